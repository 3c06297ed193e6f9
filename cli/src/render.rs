//! Liquid rendering of the assembled schema.
//!
//! Templates see three globals:
//!
//! - `package_name`: target package name.
//! - `packages`: sorted list of packages referenced by field types.
//! - `schema`: the [`SchemaView`] of the assembled schema.
//!
//! Two filters expose the naming helpers: `type_name` (`"host.ip" | type_name`
//! renders `HostIP`) and `comment` (wraps a description into `// ` lines).

use fieldgen_core::{Schema, SchemaView};
use liquid_core::{Display_filter, Filter, FilterReflection, ParseFilter};
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "type_name",
    description = "Converts a dotted or underscored field name into a title-cased identifier.",
    parsed(TypeNameFilter)
)]
pub struct TypeName;

#[derive(Debug, Default, Display_filter)]
#[name = "type_name"]
struct TypeNameFilter;

impl Filter for TypeNameFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let s = input.to_kstr();
        Ok(Value::scalar(fieldgen_core::type_name(&s)))
    }
}

#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "comment",
    description = "Wraps text into line comments.",
    parsed(CommentFilter)
)]
pub struct Comment;

#[derive(Debug, Default, Display_filter)]
#[name = "comment"]
struct CommentFilter;

impl Filter for CommentFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let s = input.to_kstr();
        Ok(Value::scalar(fieldgen_core::comment(&s)))
    }
}

/// Renders `template` against `schema`.
pub fn render(template: &str, package_name: &str, schema: &Schema) -> Result<String, String> {
    let parser = liquid::ParserBuilder::with_stdlib()
        .filter(TypeName)
        .filter(Comment)
        .build()
        .map_err(|e| format!("failed to set up template engine: {e}"))?;
    let template = parser
        .parse(template)
        .map_err(|e| format!("failed to parse the code template: {e}"))?;

    let view = SchemaView::new(schema);
    let mut globals = liquid::Object::new();
    globals.insert(
        "package_name".into(),
        Value::scalar(package_name.to_string()),
    );
    globals.insert(
        "packages".into(),
        liquid::model::to_value(&view.packages)
            .map_err(|e| format!("failed to convert schema: {e}"))?,
    );
    globals.insert(
        "schema".into(),
        liquid::model::to_value(&view).map_err(|e| format!("failed to convert schema: {e}"))?,
    );

    template
        .render(&globals)
        .map_err(|e| format!("failed to apply the code template: {e}"))
}
