use style_cascade::StyleContext;
use style_orchestrator::{ALL, BlockKey, StyleEngine};

fn engine_with_block(block: BlockKey) -> StyleEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = StyleEngine::new().expect("built-in seed tables load");
    engine.insert_block(block);
    engine
}

#[test]
fn written_value_appears_exactly_once_in_rule() {
    let block = BlockKey(1);
    let mut engine = engine_with_block(block);
    engine
        .set_style(block, ALL, ALL, ALL, "color", "#336699")
        .expect("valid write");
    let context = StyleContext::new("desktop", "landscape", ALL);
    let resolved = engine.resolved_style(block, &context);
    assert_eq!(resolved.get("color"), Some("#336699"));
    let rule = engine.css_rule_for(block, &context, "  ");
    assert!(rule.starts_with("#block-1 {"));
    assert_eq!(rule.matches("color: #336699;").count(), 1);
}

#[test]
fn engine_emits_rule_with_pseudo_selector() {
    let block = BlockKey(2);
    let mut engine = engine_with_block(block);
    engine
        .set_style(block, ALL, ALL, "hover", "background-color", "#ff0000")
        .expect("valid write");
    let hover = StyleContext::new("desktop", ALL, "hover");
    let rule = engine.css_rule_for(block, &hover, "  ");
    assert!(rule.starts_with("#block-2:hover {"));
    assert!(rule.contains("background-color: #ff0000;"));
}

#[test]
fn generic_context_selector_has_no_pseudo_suffix() {
    let block = BlockKey(3);
    let mut engine = engine_with_block(block);
    engine
        .set_style(block, ALL, ALL, ALL, "width", "120px")
        .expect("valid write");
    let rule = engine.css_rule_for(block, &StyleContext::new("desktop", ALL, ALL), "  ");
    assert!(rule.starts_with("#block-3 {"));
    assert!(rule.contains("width: 120px;"));
}

#[test]
fn unknown_block_emits_empty_rule() {
    let engine = StyleEngine::new().expect("built-in seed tables load");
    let rule = engine.css_rule_for(BlockKey(99), &StyleContext::generic(), "  ");
    assert_eq!(rule, "");
}

#[test]
fn seeded_defaults_appear_in_generic_rule() {
    let block = BlockKey(4);
    let engine = engine_with_block(block);
    let rule = engine.css_rule_for(block, &StyleContext::generic(), "  ");
    assert!(rule.contains("display: block;"));
    assert!(rule.contains("opacity: 1;"));
}
