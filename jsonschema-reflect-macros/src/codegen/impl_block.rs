//! Impl block generation for the Reflect trait.
//!
//! This module generates the `impl Reflect for Type` blocks that are
//! emitted by the derive macro.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_quote, GenericParam, Generics};

use crate::ir::{FieldIR, ReflectIR, Shape};

/// Generates the impl block for the Reflect trait.
#[derive(Debug, Default)]
pub struct ImplBlockGenerator;

impl ImplBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete `impl Reflect for TypeName` block.
    pub fn generate(&self, ir: &ReflectIR) -> TokenStream {
        let ident = &ir.ident;
        let name = self.generate_name(ir);
        let kind = self.generate_kind(&ir.shape);
        let doc = ir.doc.as_ref().map(|doc| quote! { .with_doc(#doc) });

        let generics = self.generate_generics(&ir.generics);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        quote! {
            impl #impl_generics ::jsonschema_reflect::Reflect for #ident #ty_generics #where_clause {
                fn type_info() -> ::jsonschema_reflect::TypeInfo {
                    ::jsonschema_reflect::TypeInfo::new::<Self>(#name, #kind)
                        #doc
                }
            }
        }
    }

    /// Generate the definition name expression.
    ///
    /// A generic type is named after its arguments so that each
    /// instantiation gets its own definition.
    fn generate_name(&self, ir: &ReflectIR) -> TokenStream {
        let name = &ir.name;
        let args: Vec<TokenStream> = ir
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => {
                    let ty = &ty.ident;
                    Some(quote! {
                        <#ty as ::jsonschema_reflect::Reflect>::type_info().argument_name()
                    })
                }
                GenericParam::Const(konst) => {
                    let konst = &konst.ident;
                    Some(quote! { ::std::string::ToString::to_string(&#konst) })
                }
                GenericParam::Lifetime(_) => None,
            })
            .collect();

        if args.is_empty() {
            quote! { #name }
        } else {
            quote! {
                ::jsonschema_reflect::types::generic_name(#name, &[#(#args),*])
            }
        }
    }

    /// Generate the `TypeKind` expression.
    fn generate_kind(&self, shape: &Shape) -> TokenStream {
        match shape {
            Shape::Record(fields) => {
                let fields = fields.iter().map(|field| self.generate_field(field));
                quote! {
                    ::jsonschema_reflect::TypeKind::Struct(::std::vec![#(#fields),*])
                }
            }
            Shape::Newtype(ty) => quote! {
                ::jsonschema_reflect::TypeKind::Newtype(::jsonschema_reflect::TypeRef::of::<#ty>())
            },
            Shape::WellKnown(format) => {
                let variant = format_ident!("{}", format.kind_name());
                quote! { ::jsonschema_reflect::TypeKind::#variant }
            }
            Shape::Enumerated(primitive) => {
                let primitive = format_ident!("{}", primitive);
                quote! {
                    ::jsonschema_reflect::TypeKind::Enumerated(::jsonschema_reflect::Primitive::#primitive)
                }
            }
        }
    }

    /// Generate one `FieldInfo` builder chain.
    fn generate_field(&self, field: &FieldIR) -> TokenStream {
        let ty = &field.ty;
        let ident = &field.ident;
        let exported = field.exported;

        let embedded = field.embedded.then(|| quote! { .embedded() });
        let json = field.json.as_ref().map(|v| quote! { .with_json(#v) });
        let yaml = field.yaml.as_ref().map(|v| quote! { .with_yaml(#v) });
        let constraints = field
            .constraints
            .as_ref()
            .map(|v| quote! { .with_constraints(#v) });
        let description = field
            .description
            .as_ref()
            .map(|v| quote! { .with_description(#v) });
        let enum_json = field.enum_json.as_ref().map(|v| quote! { .with_enum_json(#v) });
        let doc = field.doc.as_ref().map(|v| quote! { .with_doc(#v) });
        let omit_empty = field.omit_empty.then(|| quote! { .with_omit_empty() });

        quote! {
            ::jsonschema_reflect::FieldInfo::new::<#ty>(#ident, #exported)
                #embedded
                #json
                #yaml
                #constraints
                #description
                #enum_json
                #doc
                #omit_empty
        }
    }

    /// Bound every type parameter by `Reflect`; lifetimes must be `'static`.
    fn generate_generics(&self, generics: &Generics) -> Generics {
        let mut generics = generics.clone();
        for param in generics.params.iter_mut() {
            match param {
                GenericParam::Type(ty) => ty.bounds.push(parse_quote!(::jsonschema_reflect::Reflect)),
                GenericParam::Lifetime(lifetime) => lifetime.bounds.push(parse_quote!('static)),
                GenericParam::Const(_) => {}
            }
        }
        generics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::WellKnown;
    use syn::Type;

    fn ir(shape: Shape) -> ReflectIR {
        ReflectIR {
            ident: format_ident!("User"),
            name: "User".into(),
            generics: Generics::default(),
            doc: None,
            shape,
        }
    }

    fn code(ir: &ReflectIR) -> String {
        ImplBlockGenerator::new().generate(ir).to_string()
    }

    #[test]
    fn test_generate_record() {
        let ty: Type = parse_quote!(u64);
        let mut field = FieldIR::new("id", ty);
        field.json = Some("id,omitempty".into());
        field.constraints = Some("minimum=1".into());

        let code = code(&ir(Shape::Record(vec![field])));
        assert!(code.contains(":: jsonschema_reflect :: Reflect for User"));
        assert!(code.contains("TypeKind :: Struct"));
        assert!(code.contains("FieldInfo :: new :: < u64 > (\"id\" , true)"));
        assert!(code.contains(". with_json (\"id,omitempty\")"));
        assert!(code.contains(". with_constraints (\"minimum=1\")"));
        assert!(!code.contains("with_yaml"));
        assert!(!code.contains("embedded"));
    }

    #[test]
    fn test_generate_embedded_and_omit_empty() {
        let ty: Type = parse_quote!(Base);
        let mut field = FieldIR::new("base", ty);
        field.embedded = true;
        field.omit_empty = true;

        let code = code(&ir(Shape::Record(vec![field])));
        assert!(code.contains(". embedded ()"));
        assert!(code.contains(". with_omit_empty ()"));
    }

    #[test]
    fn test_generate_newtype_and_formats() {
        let code_newtype = code(&ir(Shape::Newtype(parse_quote!(f64))));
        assert!(code_newtype.contains("TypeKind :: Newtype"));
        assert!(code_newtype.contains("TypeRef :: of :: < f64 >"));

        let code_uri = code(&ir(Shape::WellKnown(WellKnown::Uri)));
        assert!(code_uri.contains("TypeKind :: Uri"));

        let code_time = code(&ir(Shape::WellKnown(WellKnown::DateTime)));
        assert!(code_time.contains("TypeKind :: Time"));
    }

    #[test]
    fn test_generate_enumerated() {
        let code = code(&ir(Shape::Enumerated("U8")));
        assert!(code.contains("TypeKind :: Enumerated (:: jsonschema_reflect :: Primitive :: U8)"));
    }

    #[test]
    fn test_generate_doc() {
        let mut ir = ir(Shape::Record(Vec::new()));
        ir.doc = Some("A user.".into());
        assert!(code(&ir).contains(". with_doc (\"A user.\")"));
    }

    #[test]
    fn test_generate_generics() {
        let mut ir = ir(Shape::Record(Vec::new()));
        ir.generics = parse_quote!(<'a, T: Clone>);
        let code = code(&ir);
        assert!(code.contains("'a : 'static"));
        assert!(code.contains("T : Clone + :: jsonschema_reflect :: Reflect"));
        assert!(code.contains("for User < 'a , T >"));
        assert!(code.contains("generic_name (\"User\" , & [< T as :: jsonschema_reflect :: Reflect > :: type_info () . argument_name ()])"));
    }

    #[test]
    fn test_generate_name() {
        assert!(code(&ir(Shape::Record(Vec::new()))).contains("new :: < Self > (\"User\" ,"));

        let mut ir = ir(Shape::Record(Vec::new()));
        ir.generics = parse_quote!(<const N: usize>);
        let code = code(&ir);
        assert!(code.contains("generic_name (\"User\" , & [:: std :: string :: ToString :: to_string (& N)])"));
    }

    #[test]
    fn test_generate_private_embed() {
        let mut field = FieldIR::new("base", parse_quote!(Base));
        field.exported = false;
        field.embedded = true;

        let code = code(&ir(Shape::Record(vec![field])));
        assert!(code.contains("FieldInfo :: new :: < Base > (\"base\" , false)"));
        assert!(code.contains(". embedded ()"));
    }
}
