//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use markloc::{DirectiveKind, ParsedTemplate};

/// Format the directive forest of a template as a table, one row per
/// directive, children indented under their parent.
pub fn format_tree_table(template: &ParsedTemplate<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Directive", "Token", "Arm", "Group", "Range", "Container", "Content"]);

    let text = template.untokenized();
    let tree = template.tree();
    for (depth, id) in tree.pre_order() {
        let directive = &tree[id];
        let arm = match &directive.kind {
            DirectiveKind::Ordered { arm, arms, .. } => format!("{}/{arms}", arm + 1),
            DirectiveKind::PluralZone { zone, zones, .. } => format!("{}/{zones}", zone + 1),
            DirectiveKind::InputSubstitution(_)
            | DirectiveKind::OutputSubstitution(_)
            | DirectiveKind::Attribute(_) => String::new(),
        };
        table.add_row(vec![
            format!("{}{}", "  ".repeat(depth), directive.kind.token_kind()),
            directive.kind.token_label(),
            arm,
            directive.group_id.to_string(),
            format!("{:?}", directive.range),
            format!("{:?}", directive.container),
            text.get(directive.range.clone()).unwrap_or_default().to_string(),
        ]);
    }

    table
}
