//! Door and window mapper.

use serde_json::{json, Value};

use super::parameters::{attach, division, DIVISION};
use super::properties::PropertyReader;
use super::{Host, MapContext, Mapped};
use crate::error::TranslateError;
use crate::locale::{Group, Prop};
use crate::model::record;
use crate::model::Category;
use crate::schema::apply;

/// Maps a door or window onto a family instance placed along its host wall.
///
/// The placement is a pure translation: the host wall's reference line start,
/// moved `objLoc` along the wall axis and `lower` up. Without a host frame
/// the element keeps whatever transform it already carries.
pub fn map_wido(
    element: Value,
    ctx: &MapContext<'_>,
    host: Option<&Host<'_>>,
) -> Result<Mapped, TranslateError> {
    let mut wido = element;
    let category = record::text(&wido, &["elementType"])
        .and_then(Category::parse)
        .filter(|c| matches!(c, Category::Door | Category::Window))
        .ok_or_else(|| TranslateError::MalformedRecord {
            element: record::label(&wido),
            field: "elementType".to_string(),
        })?;

    let props = PropertyReader::new(&wido, ctx.config.locale);
    let division = division(&props);
    let label = type_label(&wido, &props);

    let mut overrides = json!({
        "type": label.clone(),
        "definition": {"type": label},
        "parameters": {}
    });

    match host.and_then(|h| h.frame) {
        Some(frame) => {
            let along = record::require_number(&wido, &["objLoc"])?;
            let lift = record::number(&wido, &["lower"]).unwrap_or(0.0);
            let matrix = frame.placement_matrix(along, lift);
            record::set(&mut overrides, "transform", json!({"matrix": matrix.to_vec()}));
        }
        None => {
            tracing::warn!(
                element = %record::label(&wido),
                "no host wall frame, keeping the exported placement"
            );
            if let Some(matrix) = record::path(&wido, &["transform", "matrix"]).filter(|m| m.is_array()) {
                record::set(&mut overrides, "transform", json!({"matrix": matrix.clone()}));
            }
        }
    }

    let template = ctx.schema.template(category.template_node())?;
    apply(&mut wido, &template, &overrides)?;

    attach(&mut wido, DIVISION, division);
    Ok(Mapped::element(wido))
}

fn type_label(wido: &Value, props: &PropertyReader<'_>) -> String {
    let field = |key: &str| wido.get(key).map(record::display).unwrap_or_default();
    let orientation = props.text_or_empty(Group::WindowFilling, Prop::Orientation);
    let id = props.text_or_empty(Group::General, Prop::ElementId);
    format!(
        "{} {}x{} M:{} O: {orientation} - Id: {id}",
        field("libraryPart"),
        field("width"),
        field("height"),
        field("revealDepthFromSide"),
    )
}
