use serde_json::{json, Value};
use signdesk_core::model::element::validate_page;
use signdesk_core::{validate_element, CanvasElement, ElementKind, SchemaError};

fn samples() -> Vec<Value> {
    vec![
        json!({
            "type": "text-field", "id": "t1", "page": 0,
            "x": 10.5, "y": 20, "width": 100, "height": 24,
            "content": "Full name", "fontSize": 12, "required": true,
            "placeholder": "Enter name", "textAlign": "left"
        }),
        json!({
            "type": "image", "id": "img1", "page": 0, "order": 2, "height": 80,
            "imageUrl": "https://cdn.example/logo.png", "align": "center",
            "imageEffect": "grayscale", "backgroundColor": "#eee",
            "padding": { "top": 4, "right": 4, "bottom": 4, "left": 4 }
        }),
        json!({
            "type": "signature", "id": "s1", "page": 1,
            "x": 0, "y": 0, "width": 150, "height": 40,
            "imageData": "data:image/png;base64,AAAA", "showSignerName": true
        }),
        json!({
            "type": "date", "id": "d1", "page": 0,
            "x": 5, "y": 6, "width": 70, "height": 20, "dateFormat": "YYYY-MM-DD"
        }),
        json!({
            "type": "initials", "id": "i1", "page": 0,
            "x": 1, "y": 2, "width": 30, "height": 30, "content": "JD"
        }),
        json!({
            "type": "checkbox", "id": "c1", "page": 0,
            "x": 1, "y": 2, "width": 12, "height": 12, "checked": false
        }),
        json!({
            "type": "heading", "id": "h1", "page": 0, "order": 0, "height": 48,
            "content": "Agreement", "subtitle": "Between parties",
            "tagName": "h2", "fontStyle": "italic", "textDecoration": "underline",
            "margin": { "bottom": 12 }
        }),
        json!({
            "type": "video", "id": "v1", "page": 0, "order": 3, "height": 200,
            "width": 320, "videoUrl": "https://cdn.example/intro.mp4"
        }),
        json!({
            "type": "table", "id": "tb1", "page": 0, "order": 4, "height": 120,
            "rows": 2, "columns": 2,
            "data": [["Item", "Price"], ["Widget", "10"]], "textAlign": "right"
        }),
    ]
}

#[test]
fn every_variant_survives_a_second_pass() {
    for raw in samples() {
        let first = validate_element(&raw).unwrap();
        let serialized = serde_json::to_value(&first).unwrap();
        let second = validate_element(&serialized).unwrap();
        assert_eq!(first, second, "variant {} changed on round-trip", first.kind());
        assert_eq!(serialized["type"], raw["type"]);
    }
}

#[test]
fn samples_cover_the_closed_variant_set() {
    let kinds: Vec<ElementKind> = samples()
        .iter()
        .map(|raw| validate_element(raw).unwrap().kind())
        .collect();
    assert_eq!(kinds, ElementKind::ALL.to_vec());
}

#[test]
fn block_flow_defaults_are_explicit_after_serialization() {
    let element = validate_element(&json!({
        "type": "heading", "id": "h1", "page": 0, "order": 0, "height": 48,
        "content": "Title"
    }))
    .unwrap();
    let serialized = serde_json::to_value(&element).unwrap();

    assert_eq!(
        serialized["padding"],
        json!({ "top": 0.0, "right": 0.0, "bottom": 0.0, "left": 0.0 })
    );
    assert_eq!(serialized["margin"]["left"], json!(0.0));
    assert!(serialized.get("backgroundColor").is_none());
    assert!(serialized.get("subtitle").is_none());
}

#[test]
fn partial_spacing_fills_missing_sides_with_zero() {
    let element = validate_element(&json!({
        "type": "image", "id": "img", "page": 0, "order": 0, "height": 10,
        "margin": { "top": 8 }
    }))
    .unwrap();
    let style = element.style().unwrap();
    assert_eq!(style.margin.top, 8.0);
    assert_eq!(style.margin.bottom, 0.0);
}

#[test]
fn missing_or_unknown_tag_is_unknown_variant() {
    assert_eq!(
        validate_element(&json!({ "id": "x", "page": 0 })),
        Err(SchemaError::UnknownVariant(None))
    );
    assert_eq!(
        validate_element(&json!({ "type": "sticker", "id": "x", "page": 0 })),
        Err(SchemaError::UnknownVariant(Some("sticker".to_string())))
    );
}

#[test]
fn missing_required_field_names_variant_and_field() {
    let err = validate_element(&json!({
        "type": "signature", "id": "s1", "page": 0,
        "x": 0, "y": 0, "width": 10, "height": 10
    }))
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            variant: ElementKind::Signature,
            field: "imageData"
        }
    );

    let err = validate_element(&json!({
        "type": "table", "id": "t", "page": 0, "order": 0, "height": 10, "rows": 1,
        "columns": null
    }))
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            variant: ElementKind::Table,
            field: "columns"
        }
    );
}

#[test]
fn wrongly_typed_fields_are_invalid() {
    let err = validate_element(&json!({
        "type": "checkbox", "id": "c", "page": 0,
        "x": 0, "y": 0, "width": 1, "height": 1, "checked": "yes"
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::InvalidField {
            variant: ElementKind::Checkbox,
            ..
        }
    ));

    let err = validate_element(&json!({
        "type": "heading", "id": "h", "page": 0, "order": 0, "height": 1,
        "content": "x", "tagName": "h7"
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidField { .. }));
}

#[test]
fn unknown_fields_are_ignored() {
    let element = validate_element(&json!({
        "type": "date", "id": "d", "page": 0,
        "x": 0, "y": 0, "width": 1, "height": 1,
        "order": 7, "legacyFlag": true
    }))
    .unwrap();
    assert_eq!(element.order(), None);
    let serialized = serde_json::to_value(&element).unwrap();
    assert!(serialized.get("legacyFlag").is_none());
}

#[test]
fn non_object_input_is_rejected() {
    assert_eq!(validate_element(&json!("text-field")), Err(SchemaError::NotAnObject));
}

#[test]
fn page_layout_flow_order_is_stable_for_ties() {
    let page = validate_page(&json!({
        "pageSrc": "page-1.png",
        "layout": [
            { "type": "video", "id": "b", "page": 0, "order": 1, "height": 1 },
            { "type": "text-field", "id": "abs", "page": 0,
              "x": 0, "y": 0, "width": 1, "height": 1, "content": "" },
            { "type": "heading", "id": "a", "page": 0, "order": 0, "height": 1, "content": "" },
            { "type": "image", "id": "c", "page": 0, "order": 1, "height": 1 }
        ]
    }))
    .unwrap();

    assert!(!page.from_pdf);
    let ids: Vec<&str> = page.flow_order().iter().map(|element| element.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn invalid_layout_element_fails_the_page() {
    let err = validate_page(&json!({
        "layout": [{ "type": "initials", "id": "i", "page": 0 }]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { .. }));
}

#[test]
fn serde_deserialize_goes_through_validation() {
    let parsed: Result<CanvasElement, _> =
        serde_json::from_value(json!({ "type": "video", "id": "v", "page": 0 }));
    let message = parsed.unwrap_err().to_string();
    assert!(message.contains("order"), "unexpected message: {message}");
}
