//! Tag picker state → condition → index.

use super::common::{model_index, sorted_ids};
use tagsieve::{compile_condition, tag_condition, SelectionState, TagCategory, TagSelection};

fn categories() -> Vec<TagCategory<String>> {
    let category = |id: &str, tags: &[&str]| TagCategory {
        id: id.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };
    vec![
        category("scale", &["scale:1", "scale:2", "scale:4"]),
        category("color", &["color:1", "color:3", "color:1-3"]),
        category("format", &["jpeg"]),
        category("content", &["anime", "manga", "photo", "video"]),
    ]
}

fn select(picks: &[(&str, SelectionState)]) -> Vec<String> {
    let selection: TagSelection<String> = picks
        .iter()
        .map(|(tag, state)| (tag.to_string(), *state))
        .collect();
    let condition = compile_condition(&tag_condition(&selection, &categories()));
    sorted_ids(&model_index().with_tags(&condition))
}

#[test]
fn test_nothing_selected_keeps_everything() {
    assert_eq!(select(&[]).len(), 6);
}

#[test]
fn test_required_tags_in_one_category_widen() {
    use SelectionState::Required;
    assert_eq!(select(&[("scale:1", Required)]), vec!["1x-baldrickvhsfixv0-2", "1x-mangajpeglq"]);
    assert_eq!(
        select(&[("scale:1", Required), ("scale:2", Required)]),
        vec!["1x-baldrickvhsfixv0-2", "1x-mangajpeglq", "2x-anifilm-compact", "2x-dejpg-colorize"]
    );
}

#[test]
fn test_categories_narrow() {
    use SelectionState::Required;
    assert_eq!(
        select(&[("scale:1", Required), ("scale:2", Required), ("anime", Required)]),
        vec!["2x-anifilm-compact"]
    );
}

#[test]
fn test_forbidden_tags_exclude() {
    use SelectionState::{Forbidden, Required};
    assert_eq!(
        select(&[("scale:2", Required), ("scale:4", Required), ("jpeg", Forbidden)]),
        vec!["2x-anifilm-compact", "4x-animesharp", "4x-ultrasharp"]
    );
    assert_eq!(
        select(&[("color:3", Forbidden), ("color:1", Forbidden)]),
        vec!["2x-dejpg-colorize"]
    );
}

#[test]
fn test_contradictory_selection_is_empty() {
    use SelectionState::{Forbidden, Required};
    // the only manga model is also the jpeg one
    assert!(select(&[("manga", Required), ("jpeg", Forbidden)]).is_empty());
}
