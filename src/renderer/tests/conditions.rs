use pretty_assertions::assert_eq;
use serde_json::json;

use super::render_template;
use crate::context::Context;

fn terms_context(terms: serde_json::Value) -> Context {
    let mut context = Context::new();
    context.insert("terms", &terms);
    context
}

#[test]
fn truthy_condition_keeps_the_element_without_the_directive() {
    let context = terms_context(json!({"petsAllowed": true}));
    assert_eq!(
        render_template(
            "<div class=\"clause\" data-if=\"terms.petsAllowed\"><p>разрешено</p></div>",
            &context
        )
        .unwrap(),
        "<div class=\"clause\"><p>разрешено</p></div>"
    );
}

#[test]
fn falsy_condition_drops_the_element_and_children() {
    let context = terms_context(json!({"petsAllowed": false}));
    assert_eq!(
        render_template(
            "<p>A</p><div data-if=\"terms.petsAllowed\"><p>разрешено</p></div><p>B</p>",
            &context
        )
        .unwrap(),
        "<p>A</p><p>B</p>"
    );
}

#[test]
fn negated_condition() {
    let context = terms_context(json!({"petsAllowed": false}));
    assert_eq!(
        render_template("<div data-if=\"not:terms.petsAllowed\">без животных</div>", &context)
            .unwrap(),
        "<div>без животных</div>"
    );
    assert_eq!(
        render_template("<div data-if=\"not:terms.missing\">x</div>", &context).unwrap(),
        "<div>x</div>"
    );
}

#[test]
fn equality_condition_both_ways() {
    let content = "<div data-if=\"terms.paymentMethod == 'bank'\">X</div>";

    let bank = terms_context(json!({"paymentMethod": "bank"}));
    assert_eq!(render_template(content, &bank).unwrap(), "<div>X</div>");

    let cash = terms_context(json!({"paymentMethod": "cash"}));
    assert_eq!(render_template(content, &cash).unwrap(), "");
}

#[test]
fn equality_compares_the_string_form() {
    let context = terms_context(json!({"rooms": 2}));
    assert_eq!(
        render_template("<div data-if=\"terms.rooms == '2'\">двушка</div>", &context).unwrap(),
        "<div>двушка</div>"
    );
}

#[test]
fn equality_on_a_missing_path() {
    let context = terms_context(json!({}));
    assert_eq!(
        render_template("<div data-if=\"terms.kind == ''\">x</div>", &context).unwrap(),
        ""
    );
    assert_eq!(
        render_template("<div data-if=\"not:terms.kind == 'sublease'\">x</div>", &context).unwrap(),
        "<div>x</div>"
    );
}

#[test]
fn falsy_scalars_drop_the_block() {
    for falsy in [json!(0), json!(""), json!("  "), json!("false"), json!("0"), json!("no"), json!("нет"), json!("null"), json!("undefined"), json!(null)] {
        let context = terms_context(json!({ "flag": falsy }));
        assert_eq!(
            render_template("<div data-if=\"terms.flag\">x</div>", &context).unwrap(),
            "",
            "{:?} should be falsy",
            context.get("terms")
        );
    }
}

#[test]
fn truthy_scalars_keep_the_block() {
    for truthy in [json!(1), json!(-1), json!(0.5), json!("yes"), json!("да"), json!("bank"), json!([1]), json!([]), json!({})] {
        let context = terms_context(json!({ "flag": truthy }));
        assert_eq!(
            render_template("<div data-if=\"terms.flag\">x</div>", &context).unwrap(),
            "<div>x</div>",
            "{:?} should be truthy",
            context.get("terms")
        );
    }
}

#[test]
fn missing_key_is_falsy() {
    assert_eq!(
        render_template("<div data-if=\"terms.nope\">x</div>", &terms_context(json!({}))).unwrap(),
        ""
    );
}

#[test]
fn nested_conditionals() {
    let context = terms_context(json!({"petsAllowed": true, "paymentMethod": "cash"}));
    let content = "<div data-if=\"terms.petsAllowed\">\
                   <p>снаружи</p>\
                   <div data-if=\"terms.paymentMethod == 'bank'\"><p>внутри</p></div>\
                   </div>";
    assert_eq!(
        render_template(content, &context).unwrap(),
        "<div><p>снаружи</p></div>"
    );
}

#[test]
fn condition_stacked_with_a_placeholder() {
    let content =
        "<span data-if=\"terms.insured\" data-ph=\"terms.insuranceAmount\"></span>";

    let on = terms_context(json!({"insured": true, "insuranceAmount": "5000"}));
    assert_eq!(
        render_template(content, &on).unwrap(),
        "<span>5 000 (Пять тысяч) рублей 00 копеек</span>"
    );

    let off = terms_context(json!({"insured": false, "insuranceAmount": "5000"}));
    assert_eq!(render_template(content, &off).unwrap(), "");
}

#[test]
fn dropped_branch_never_resolves_placeholders() {
    // the block is dropped wholesale, its placeholders are not evaluated
    let context = terms_context(json!({"sublease": false}));
    assert_eq!(
        render_template(
            "<div data-if=\"terms.sublease\"><span data-ph=\"terms.subleaseHolderAmount\"></span></div>",
            &context
        )
        .unwrap(),
        ""
    );
}
