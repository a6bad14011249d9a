use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, Type, ext::IdentExt,
    spanned::Spanned,
};

pub(crate) fn expand_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`Record` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`Record` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    let descriptors = fields.iter().map(|field| {
        let FieldMetadata {
            ident,
            name,
            ty,
            column,
        } = field;

        let column = column.as_ref().map(|column| quote! { .column(#column) });

        quote! {
            ::colbind::Descriptor::<Self>::new(
                #name,
                ::core::any::type_name::<#ty>(),
                {
                    #[allow(unused_imports)]
                    use ::colbind::__private::{ViaNothing, ViaPrimitive, ViaValue};
                    (&&&::colbind::__private::Probe::<#ty>::new()).kind()
                },
                |record| {
                    #[allow(unused_imports)]
                    use ::colbind::__private::{ViaNothing, ViaPrimitive, ViaValue};
                    (&&&::colbind::__private::Probe::<#ty>::new()).slot(&mut record.#ident)
                },
            )
            #column
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::colbind::Record for #name #ty_generics #where_clause {
            fn fields() -> ::colbind::__private::Vec<::colbind::Descriptor<Self>> {
                ::colbind::__private::Vec::from([#(#descriptors),*])
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    ident: Ident,
    name: String,
    ty: Type,
    column: Option<LitStr>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let Some(ident) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let name = ident.unraw().to_string();

        let column = match field.attrs.iter().find(|a| a.path().is_ident("field")) {
            Some(attr) => {
                let column: LitStr = attr.meta.require_list()?.parse_args()?;

                if column.value().is_empty() {
                    Err(Error::new_spanned(
                        &column,
                        "Column name must not be empty.",
                    ))?
                }

                Some(column)
            }
            None => None,
        };

        Ok(Self {
            ident,
            name,
            ty: field.ty.clone(),
            column,
        })
    }
}
