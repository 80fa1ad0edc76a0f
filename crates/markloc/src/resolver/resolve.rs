//! The two resolution passes.

use tracing::debug;

use super::context::ResolveContext;
use super::error::ResolveWarning;
use super::info::ResolvingInfo;
use super::walker::Walker;
use crate::parser::{Directive, DirectiveKind, ParsedTemplate, TokenKind};
use crate::plurality::{Plurality, select_arm, select_zone};
use crate::types::Text;

/// Resolves `template` into a fresh output value.
///
/// Works on private copies of the tree and text: the template itself is
/// never modified, so it can be resolved any number of times.
pub(crate) fn resolve<S: Text, D: Text>(
    template: &ParsedTemplate<S>,
    info: &ResolvingInfo<S, D>,
    context: &mut ResolveContext,
) -> D {
    let mut walker = Walker::new(
        template.tree().clone(),
        template.untokenized().plain().to_string(),
    );

    let mut source = template.untokenized().clone();
    while let Some(id) = walker.next_node() {
        let directive = walker.directive(id).clone();
        let DirectiveKind::InputSubstitution(token) = &directive.kind else {
            continue;
        };
        let Some(substitute) = info.input_substitution(token) else {
            context.missing_value(TokenKind::InputSubstitution, token);
            continue;
        };
        let value = substitute(source.slice(directive.range.clone()));
        let inserted = source.splice(directive.container.clone(), value);
        walker.delete_group(directive.group_id);
        walker.replace(directive.container, &inserted);
    }

    let mut output = (info.identity())(source);
    if output.plain() != walker.text() {
        context.add_warning(ResolveWarning::TextChanged {
            kind: TokenKind::InputSubstitution,
            token: "identity".to_string(),
        });
        return output;
    }

    walker.reset();
    while let Some(id) = walker.next_node() {
        let directive = walker.directive(id).clone();
        match &directive.kind {
            DirectiveKind::InputSubstitution(_) => {}
            DirectiveKind::Attribute(token) => {
                let Some(apply) = info.attribute(token) else {
                    context.missing_value(TokenKind::Attribute, token);
                    continue;
                };
                apply(&mut output, directive.range.clone());
                if output.plain() != walker.text() {
                    context.add_warning(ResolveWarning::TextChanged {
                        kind: TokenKind::Attribute,
                        token: token.to_string(),
                    });
                    return output;
                }
                walker.delete_group(directive.group_id);
            }
            DirectiveKind::OutputSubstitution(token) => {
                let Some(substitute) = info.output_substitution(token) else {
                    context.missing_value(TokenKind::OutputSubstitution, token);
                    continue;
                };
                let value = substitute(output.slice(directive.range.clone()));
                let inserted = output.splice(directive.container.clone(), value);
                walker.delete_group(directive.group_id);
                walker.replace(directive.container.clone(), &inserted);
            }
            DirectiveKind::Ordered { token, arm, arms } => {
                let Some(desired) = info.ordered_value(token) else {
                    context.missing_value(TokenKind::Ordered, token);
                    continue;
                };
                if select_arm(desired, *arms) == *arm {
                    keep_arm(&mut output, &mut walker, &directive);
                }
            }
            DirectiveKind::PluralZone { token, zone, zones } => {
                let Some(value) = info.plural_value(token) else {
                    context.missing_value(TokenKind::Plural, token);
                    continue;
                };
                let plurality: &dyn Plurality = match template.plurality_override(token) {
                    Some(definition) => definition,
                    None => info.default_plurality(),
                };
                if select_zone(value, *zones, plurality) == *zone {
                    keep_arm(&mut output, &mut walker, &directive);
                }
            }
        }
    }

    debug!(remaining = walker.tree().len(), "resolved template");
    output
}

/// Replaces a whole multi-arm occurrence with the content of `arm`.
fn keep_arm<D: Text>(output: &mut D, walker: &mut Walker, arm: &Directive) {
    let content = output.slice(arm.range.clone());
    let inserted = output.splice(arm.container.clone(), content);
    walker.delete_group(arm.group_id);
    walker.replace(arm.container.clone(), &inserted);
}
