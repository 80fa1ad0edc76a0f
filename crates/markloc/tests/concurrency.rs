//! Tests for sharing parsed templates and resolving info across threads.

use std::collections::BTreeMap;
use std::thread;

use markloc::{
    CommonTokens, ParsedTemplate, ParsingInfo, ResolvingInfo, StyledText, TripleToken, identity,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_send_and_sync() {
    assert_send_sync::<ParsedTemplate<String>>();
    assert_send_sync::<ParsedTemplate<StyledText>>();
    assert_send_sync::<ResolvingInfo<String, String>>();
    assert_send_sync::<ResolvingInfo<String, StyledText>>();
    assert_send_sync::<ParsingInfo>();
    assert_send_sync::<CommonTokens>();
}

fn ordered(index: i64) -> ResolvingInfo<String, String> {
    ResolvingInfo::builder()
        .ordered(BTreeMap::from([(TripleToken::new("<", ":", ">"), index)]))
        .identity(identity())
        .build()
        .unwrap()
}

#[test]
fn test_one_template_resolved_from_many_threads() {
    let template = ordered(0).parse("the <first:second:third> one");
    let infos: Vec<ResolvingInfo<String, String>> = (0..3).map(ordered).collect();

    let shared = &template;
    let results: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = infos
            .iter()
            .map(|info| scope.spawn(move || shared.resolve(info)))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(results, ["the first one", "the second one", "the third one"]);
    assert_eq!(template.resolve(&infos[1]), "the second one");
}
