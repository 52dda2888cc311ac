use darling::ast::NestedMeta;
use darling::FromMeta;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Default config file name when none is given.
const DEF_FILENAME: &str = "config.hcl";

#[derive(Debug, FromMeta)]
struct ConfigArgs {
    /// Expected value of the `version` key in the file
    #[darling(default)]
    version: Option<usize>,
    /// Basename of the configuration file
    #[darling(default)]
    filename: Option<String>,
}

/// Turn a plain `struct` into a versioned configuration file description.
///
/// This adds a `version: usize` field (which must be present in the file), implements
/// `Versioned` for it and `IntoConfig` with the expected version and filename:
///
/// ```ignore
/// #[into_configfile(version = 2, filename = "shelters.hcl")]
/// #[derive(Debug, Default, Deserialize)]
/// struct Config {
///     pub base_url: String,
/// }
/// ```
///
/// Both traits must be in scope where the attribute is used.
///
#[proc_macro_attribute]
pub fn into_configfile(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(darling::Error::from(e).write_errors()),
    };
    let args = match ConfigArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };
    let version = args.version.unwrap_or(1);
    let filename = args.filename.unwrap_or_else(|| DEF_FILENAME.to_string());

    let mut input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident.clone();

    match input.data {
        Data::Struct(ref mut data) => match &mut data.fields {
            Fields::Named(fields) => {
                let field = syn::Field::parse_named.parse2(quote! { pub version: usize });
                match field {
                    Ok(field) => fields.named.push(field),
                    Err(e) => return e.to_compile_error().into(),
                }
            }
            _ => {
                return syn::Error::new_spanned(&input, "#[into_configfile] needs named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "#[into_configfile] is only for struct")
                .to_compile_error()
                .into();
        }
    }

    let output = quote! {
        #input

        impl Versioned for #ident {
            fn version(&self) -> usize {
                self.version
            }
        }

        impl IntoConfig for #ident {
            const VERSION: usize = #version;
            const FILENAME: &'static str = #filename;
        }
    };
    output.into()
}
