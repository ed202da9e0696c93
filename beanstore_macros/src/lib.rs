mod model;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Model)] derive macro
// ============================================================================

/// Derive macro for the `Model` trait and the model's typed patch.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Serialize, Deserialize, Model)]
/// #[serde(rename_all = "camelCase")]
/// #[model(collection = "BeanUsers")]
/// struct User {
///     #[model(id)]
///     pub id: String,
///     #[model(patch)]
///     pub display_name: String,
///     pub created_by: String,
/// }
/// ```
///
/// expands to `impl Model for User` plus
///
/// ```ignore
/// #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// pub struct UserPatch {
///     #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
///     pub display_name: Option<String>,
/// }
///
/// impl Patch for UserPatch { /* FIELDS = ["displayName"] */ }
/// ```
///
/// - `#[model(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[model(id)]` marks the primary key field.
///   If omitted, defaults to a field named `id`.
/// - `#[model(patch)]` puts a field on the update allow-list. Fields without
///   it (and always the id) are immutable once the model is stored.
///
/// Field names in the patch follow the struct's serde naming
/// (`rename_all` and per-field `rename`), so a patch deserialized from
/// JSON accepts exactly the attribute names the model is stored under.
/// Unknown keys are ignored.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}
