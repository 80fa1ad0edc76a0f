mod attributes;
mod styled;
mod text;
mod token;

pub use attributes::{AttributeChange, AttributesChanges};
pub use styled::{Attributes, Color, ColorParseError, Font, StyledText};
pub use text::Text;
pub use token::{SingleToken, TripleToken};
