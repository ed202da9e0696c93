use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, LitStr};

pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;
    let patch_name = format_ident!("{}Patch", name);

    // Extract #[model(collection = "...")] from struct-level attributes
    let collection = extract_collection(&input);

    // Wire names follow serde, so the patch names the same attributes the store holds
    let rename_all = serde_string(&input.attrs, "rename_all");

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("Model derive only supports structs with named fields"),
        },
        _ => panic!("Model derive only supports structs"),
    };

    let id_field = extract_id_field(fields.iter());
    let id_ident = id_field.ident.clone().unwrap();
    let id_wire = wire_name(id_field, rename_all.as_deref());

    let mut patch_fields = Vec::new();
    for field in fields {
        if !has_model_flag(&field.attrs, "patch") {
            continue;
        }
        if field.ident == id_field.ident {
            panic!("Model derive: the id field cannot be marked #[model(patch)]");
        }
        patch_fields.push((
            field.ident.clone().unwrap(),
            field.ty.clone(),
            wire_name(field, rename_all.as_deref()),
        ));
    }

    let field_defs: Vec<_> = patch_fields
        .iter()
        .map(|(ident, ty, wire)| {
            quote! {
                #[serde(default, rename = #wire, skip_serializing_if = "Option::is_none")]
                pub #ident: Option<#ty>
            }
        })
        .collect();

    let wire_names: Vec<_> = patch_fields.iter().map(|(_, _, wire)| wire).collect();

    let pushes: Vec<_> = patch_fields
        .iter()
        .map(|(ident, _, wire)| {
            quote! {
                if let Some(value) = &self.#ident {
                    assignments.push(beanstore::Assignment::new(
                        #wire,
                        serde_json::to_value(value)?,
                    ));
                }
            }
        })
        .collect();

    let patch_doc = format!(
        "Partial update for [`{}`]. Only fields on its update allow-list appear here.",
        name
    );

    let expanded = quote! {
        #[doc = #patch_doc]
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #vis struct #patch_name {
            #(#field_defs),*
        }

        impl beanstore::Model for #name {
            const COLLECTION: &'static str = #collection;
            const KEY: &'static str = #id_wire;
            type Patch = #patch_name;

            fn id(&self) -> &str {
                &self.#id_ident
            }
        }

        impl beanstore::Patch for #patch_name {
            type Model = #name;

            const FIELDS: &'static [&'static str] = &[#(#wire_names),*];

            #[allow(unused_mut)]
            fn assignments(
                &self,
            ) -> ::std::result::Result<::std::vec::Vec<beanstore::Assignment>, serde_json::Error> {
                let mut assignments = ::std::vec::Vec::new();
                #(#pushes)*
                Ok(assignments)
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

fn extract_id_field<'a>(fields: impl Iterator<Item = &'a Field> + Clone) -> &'a Field {
    for field in fields.clone() {
        if has_model_flag(&field.attrs, "id") {
            return field;
        }
    }

    // Default: look for a field named "id"
    for field in fields {
        if field.ident.as_ref().is_some_and(|ident| ident == "id") {
            return field;
        }
    }

    panic!("Model derive: no field marked with #[model(id)] and no field named `id`");
}

fn has_model_flag(attrs: &[Attribute], flag: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            Ok(())
        });

        if found {
            return true;
        }
    }
    false
}

/// The attribute name serde uses for `field`.
fn wire_name(field: &Field, rename_all: Option<&str>) -> String {
    if let Some(rename) = serde_string(&field.attrs, "rename") {
        return rename;
    }

    let name = field.ident.as_ref().unwrap().to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    match rename_all {
        Some("camelCase") => to_camel_case(name),
        Some("PascalCase") => {
            let camel = to_camel_case(name);
            let mut chars = camel.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => camel,
            }
        }
        Some("snake_case") | None => name.to_string(),
        Some(other) => panic!("Model derive: unsupported serde rename_all = \"{}\"", other),
    }
}

/// Find `#[serde(key = "value")]` among `attrs`, skipping everything else.
fn serde_string(attrs: &[Attribute], key: &str) -> Option<String> {
    let mut found = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) && meta.input.peek(syn::Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                found = Some(value.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: proc_macro2::TokenStream = content.parse()?;
            }
            Ok(())
        });
    }
    found
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut upper_next = false;
    for ch in s.chars() {
        if ch == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
