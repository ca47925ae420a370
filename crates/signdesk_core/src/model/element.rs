//! Canvas element schema.
//!
//! # Responsibility
//! - Define the closed set of canvas element variants and page envelopes.
//! - Validate raw JSON into typed elements with per-variant required fields.
//! - Centralize defaults for optional element fields.
//!
//! # Invariants
//! - Validation dispatches on `type` before touching any other field.
//! - The `type` tag is derived from the enum variant and cannot drift from it.
//! - Serialization re-emits every present field, so validated elements
//!   survive a storage round-trip unchanged.
//! - Unknown keys are ignored on every variant.
//!
//! # Defaults
//! - `BlockStyle.padding` / `BlockStyle.margin`: all four sides `0`.
//! - `Page.fromPdf`: `false`; `Page.layout`: empty.
//! - Every other optional field: absent (not emitted on serialization).

use super::null_as_default;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Discriminant of a canvas element (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    TextField,
    Image,
    Signature,
    Date,
    Initials,
    Checkbox,
    Heading,
    Video,
    Table,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        Self::TextField,
        Self::Image,
        Self::Signature,
        Self::Date,
        Self::Initials,
        Self::Checkbox,
        Self::Heading,
        Self::Video,
        Self::Table,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextField => "text-field",
            Self::Image => "image",
            Self::Signature => "signature",
            Self::Date => "date",
            Self::Initials => "initials",
            Self::Checkbox => "checkbox",
            Self::Heading => "heading",
            Self::Video => "video",
            Self::Table => "table",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Block-flow variants stack vertically by `order` and carry no `x`/`y`.
    pub fn is_block_flow(self) -> bool {
        matches!(self, Self::Image | Self::Heading | Self::Video | Self::Table)
    }

    /// Wire keys that must be present and non-null for this variant.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::TextField => &["id", "page", "x", "y", "width", "height", "content"],
            Self::Image => &["id", "page", "order", "height"],
            Self::Signature => &["id", "page", "x", "y", "width", "height", "imageData"],
            Self::Date => &["id", "page", "x", "y", "width", "height"],
            Self::Initials => &["id", "page", "x", "y", "width", "height", "content"],
            Self::Checkbox => &["id", "page", "x", "y", "width", "height", "checked"],
            Self::Heading => &["id", "page", "order", "height", "content"],
            Self::Video => &["id", "page", "order", "height"],
            Self::Table => &["id", "page", "order", "height", "rows", "columns"],
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Input is not a JSON object.
    NotAnObject,
    /// `type` tag is missing (`None`) or outside the closed variant set.
    UnknownVariant(Option<String>),
    /// Required field for the variant is absent or null.
    MissingField {
        variant: ElementKind,
        field: &'static str,
    },
    /// Field is present but has the wrong shape.
    InvalidField { variant: ElementKind, message: String },
    /// Numeric field holds NaN or an infinity.
    NonFiniteNumber {
        variant: ElementKind,
        field: &'static str,
    },
    /// Page envelope is malformed.
    InvalidPage(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "canvas element must be an object"),
            Self::UnknownVariant(Some(tag)) => write!(f, "unknown canvas element type `{tag}`"),
            Self::UnknownVariant(None) => write!(f, "canvas element is missing its `type` tag"),
            Self::MissingField { variant, field } => {
                write!(f, "`{variant}` element is missing required field `{field}`")
            }
            Self::InvalidField { variant, message } => {
                write!(f, "invalid `{variant}` element: {message}")
            }
            Self::NonFiniteNumber { variant, field } => {
                write!(f, "`{variant}` element field `{field}` must be a finite number")
            }
            Self::InvalidPage(message) => write!(f, "invalid page: {message}"),
        }
    }
}

impl Error for SchemaError {}

/// Four-sided spacing value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSpacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl BoxSpacing {
    fn is_finite(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|side| side.is_finite())
    }
}

/// Styling shared by block-flow variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub padding: BoxSpacing,
    #[serde(default, deserialize_with = "null_as_default")]
    pub margin: BoxSpacing,
}

/// Absolute placement in page coordinate space. Bounds are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEffect {
    #[serde(rename = "none")]
    Plain,
    Grayscale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[serde(rename = "none")]
    Plain,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldElement {
    pub id: String,
    pub page: u32,
    #[serde(flatten)]
    pub frame: Frame,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    pub page: u32,
    pub order: i64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_effect: Option<ImageEffect>,
    #[serde(flatten)]
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureElement {
    pub id: String,
    pub page: u32,
    #[serde(flatten)]
    pub frame: Frame,
    pub image_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_signer_name: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateElement {
    pub id: String,
    pub page: u32,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialsElement {
    pub id: String,
    pub page: u32,
    #[serde(flatten)]
    pub frame: Frame,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxElement {
    pub id: String,
    pub page: u32,
    #[serde(flatten)]
    pub frame: Frame,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingElement {
    pub id: String,
    pub page: u32,
    pub order: i64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<HeadingTag>,
    #[serde(flatten)]
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoElement {
    pub id: String,
    pub page: u32,
    pub order: i64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(flatten)]
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub id: String,
    pub page: u32,
    pub order: i64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub rows: u32,
    pub columns: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(flatten)]
    pub style: BlockStyle,
}

/// One visual element placed on a document page.
///
/// Deserialization always goes through [`validate_element`], so stored and
/// caller-supplied elements are held to the same rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CanvasElement {
    TextField(TextFieldElement),
    Image(ImageElement),
    Signature(SignatureElement),
    Date(DateElement),
    Initials(InitialsElement),
    Checkbox(CheckboxElement),
    Heading(HeadingElement),
    Video(VideoElement),
    Table(TableElement),
}

impl CanvasElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::TextField(_) => ElementKind::TextField,
            Self::Image(_) => ElementKind::Image,
            Self::Signature(_) => ElementKind::Signature,
            Self::Date(_) => ElementKind::Date,
            Self::Initials(_) => ElementKind::Initials,
            Self::Checkbox(_) => ElementKind::Checkbox,
            Self::Heading(_) => ElementKind::Heading,
            Self::Video(_) => ElementKind::Video,
            Self::Table(_) => ElementKind::Table,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::TextField(element) => element.id.as_str(),
            Self::Image(element) => element.id.as_str(),
            Self::Signature(element) => element.id.as_str(),
            Self::Date(element) => element.id.as_str(),
            Self::Initials(element) => element.id.as_str(),
            Self::Checkbox(element) => element.id.as_str(),
            Self::Heading(element) => element.id.as_str(),
            Self::Video(element) => element.id.as_str(),
            Self::Table(element) => element.id.as_str(),
        }
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        match self {
            Self::TextField(element) => element.page,
            Self::Image(element) => element.page,
            Self::Signature(element) => element.page,
            Self::Date(element) => element.page,
            Self::Initials(element) => element.page,
            Self::Checkbox(element) => element.page,
            Self::Heading(element) => element.page,
            Self::Video(element) => element.page,
            Self::Table(element) => element.page,
        }
    }

    /// Absolute placement; `None` for block-flow variants.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Self::TextField(element) => Some(&element.frame),
            Self::Signature(element) => Some(&element.frame),
            Self::Date(element) => Some(&element.frame),
            Self::Initials(element) => Some(&element.frame),
            Self::Checkbox(element) => Some(&element.frame),
            Self::Image(_) | Self::Heading(_) | Self::Video(_) | Self::Table(_) => None,
        }
    }

    /// Stacking order; `None` for absolute-position variants.
    pub fn order(&self) -> Option<i64> {
        match self {
            Self::Image(element) => Some(element.order),
            Self::Heading(element) => Some(element.order),
            Self::Video(element) => Some(element.order),
            Self::Table(element) => Some(element.order),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&BlockStyle> {
        match self {
            Self::Image(element) => Some(&element.style),
            Self::Heading(element) => Some(&element.style),
            Self::Video(element) => Some(&element.style),
            Self::Table(element) => Some(&element.style),
            _ => None,
        }
    }

    /// Checks numeric invariants that JSON input cannot violate but
    /// in-process construction can.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let variant = self.kind();
        let non_finite = |field: &'static str| SchemaError::NonFiniteNumber { variant, field };

        if let Some(frame) = self.frame() {
            for (field, value) in [
                ("x", frame.x),
                ("y", frame.y),
                ("width", frame.width),
                ("height", frame.height),
            ] {
                if !value.is_finite() {
                    return Err(non_finite(field));
                }
            }
        }

        let (height, width) = match self {
            Self::Image(element) => (Some(element.height), element.width),
            Self::Heading(element) => (Some(element.height), element.width),
            Self::Video(element) => (Some(element.height), element.width),
            Self::Table(element) => (Some(element.height), element.width),
            _ => (None, None),
        };
        if height.is_some_and(|value| !value.is_finite()) {
            return Err(non_finite("height"));
        }
        if width.is_some_and(|value| !value.is_finite()) {
            return Err(non_finite("width"));
        }

        let font_sizes = match self {
            Self::TextField(element) => [element.font_size, None],
            Self::Heading(element) => [element.font_size, element.subtitle_font_size],
            Self::Table(element) => [element.font_size, None],
            _ => [None, None],
        };
        if font_sizes
            .iter()
            .flatten()
            .any(|value| !value.is_finite())
        {
            return Err(non_finite("fontSize"));
        }

        if let Some(style) = self.style() {
            if !style.padding.is_finite() {
                return Err(non_finite("padding"));
            }
            if !style.margin.is_finite() {
                return Err(non_finite("margin"));
            }
        }

        Ok(())
    }
}

impl<'de> Deserialize<'de> for CanvasElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        validate_element(&raw).map_err(D::Error::custom)
    }
}

/// Validates raw JSON into a typed canvas element.
///
/// # Errors
/// - `UnknownVariant` when `type` is missing or not a known variant.
/// - `MissingField` when a variant's required field is absent or null.
/// - `InvalidField` when a present field has the wrong type or enum value.
/// - `NonFiniteNumber` when a numeric field is not finite.
pub fn validate_element(raw: &Value) -> Result<CanvasElement, SchemaError> {
    let object = raw.as_object().ok_or(SchemaError::NotAnObject)?;
    let kind = match object.get("type") {
        Some(Value::String(tag)) => {
            ElementKind::parse(tag).ok_or_else(|| SchemaError::UnknownVariant(Some(tag.clone())))?
        }
        Some(Value::Null) | None => return Err(SchemaError::UnknownVariant(None)),
        Some(other) => return Err(SchemaError::UnknownVariant(Some(other.to_string()))),
    };

    for &field in kind.required_fields() {
        if object.get(field).map_or(true, Value::is_null) {
            return Err(SchemaError::MissingField {
                variant: kind,
                field,
            });
        }
    }

    let element = decode_variant(kind, raw).map_err(|err| SchemaError::InvalidField {
        variant: kind,
        message: err.to_string(),
    })?;
    element.validate()?;
    Ok(element)
}

fn decode_variant(kind: ElementKind, raw: &Value) -> Result<CanvasElement, serde_json::Error> {
    Ok(match kind {
        ElementKind::TextField => CanvasElement::TextField(TextFieldElement::deserialize(raw)?),
        ElementKind::Image => CanvasElement::Image(ImageElement::deserialize(raw)?),
        ElementKind::Signature => CanvasElement::Signature(SignatureElement::deserialize(raw)?),
        ElementKind::Date => CanvasElement::Date(DateElement::deserialize(raw)?),
        ElementKind::Initials => CanvasElement::Initials(InitialsElement::deserialize(raw)?),
        ElementKind::Checkbox => CanvasElement::Checkbox(CheckboxElement::deserialize(raw)?),
        ElementKind::Heading => CanvasElement::Heading(HeadingElement::deserialize(raw)?),
        ElementKind::Video => CanvasElement::Video(VideoElement::deserialize(raw)?),
        ElementKind::Table => CanvasElement::Table(TableElement::deserialize(raw)?),
    })
}

/// One page of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_src: Option<String>,
    pub from_pdf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Insertion order is significant for block-flow rendering.
    pub layout: Vec<CanvasElement>,
}

impl Page {
    /// Block-flow elements in stacking order. Equal `order` keeps layout order.
    pub fn flow_order(&self) -> Vec<&CanvasElement> {
        let mut blocks: Vec<&CanvasElement> = self
            .layout
            .iter()
            .filter(|element| element.kind().is_block_flow())
            .collect();
        blocks.sort_by_key(|element| element.order().unwrap_or_default());
        blocks
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageEnvelope {
    #[serde(default)]
    page_src: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    from_pdf: bool,
    #[serde(default)]
    image_path: Option<String>,
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        validate_page(&raw).map_err(D::Error::custom)
    }
}

/// Validates raw JSON into a page, validating every layout element.
pub fn validate_page(raw: &Value) -> Result<Page, SchemaError> {
    if !raw.is_object() {
        return Err(SchemaError::InvalidPage("page must be an object".to_string()));
    }
    let layout = validate_elements(raw.get("layout"))?;
    let envelope =
        PageEnvelope::deserialize(raw).map_err(|err| SchemaError::InvalidPage(err.to_string()))?;
    Ok(Page {
        page_src: envelope.page_src,
        from_pdf: envelope.from_pdf,
        image_path: envelope.image_path,
        layout,
    })
}

/// Validates an optional JSON array of elements. Absent or null is empty.
pub fn validate_elements(raw: Option<&Value>) -> Result<Vec<CanvasElement>, SchemaError> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(validate_element).collect(),
        Some(_) => Err(SchemaError::InvalidPage(
            "element list must be an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_element, CanvasElement, ElementKind, SchemaError};
    use serde_json::json;

    #[test]
    fn kind_parse_covers_every_tag() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ElementKind::parse("text_field"), None);
    }

    #[test]
    fn block_style_defaults_spacing_to_zero() {
        let element = validate_element(&json!({
            "type": "video",
            "id": "v1",
            "page": 0,
            "order": 1,
            "height": 120.0,
            "padding": null
        }))
        .unwrap();
        let style = element.style().expect("video carries block style");
        assert_eq!(style.padding.top, 0.0);
        assert_eq!(style.margin.left, 0.0);
        assert!(style.background_color.is_none());
    }

    #[test]
    fn validate_rejects_nan_geometry() {
        let mut element = validate_element(&json!({
            "type": "initials",
            "id": "i1",
            "page": 0,
            "x": 1, "y": 2, "width": 3, "height": 4,
            "content": "AB"
        }))
        .unwrap();
        if let CanvasElement::Initials(inner) = &mut element {
            inner.frame.y = f64::NAN;
        }
        assert_eq!(
            element.validate(),
            Err(SchemaError::NonFiniteNumber {
                variant: ElementKind::Initials,
                field: "y"
            })
        );
    }
}
