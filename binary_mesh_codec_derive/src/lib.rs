extern crate proc_macro;

use crate::proc_macro::TokenStream;

use quote::quote;

use syn::{parse_macro_input, parse_quote, Data, DataStruct, DeriveInput, Fields};

/// Implements `Serializable` by encoding each named field in declaration order.
/// Every type parameter receives a `Serializable` bound.
#[proc_macro_derive(Serializable)]
pub fn serializable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let implementing_type = &input.ident;
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return syn::Error::new_spanned(
                implementing_type,
                "Serializable can only be derived for structs with named fields",
            )
            .to_compile_error()
            .into()
        }
    };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(parse_quote!(::binary_mesh_codec::Serializable));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_names: Vec<_> = fields.iter().map(|field| &field.ident).collect();

    // Fields are read back in the same order they were written.
    let expanded = quote! {
        impl #impl_generics ::binary_mesh_codec::Serializable for #implementing_type #ty_generics #where_clause {
            fn serialize<__W: ::std::io::Write>(&self, writer: &mut __W) -> ::std::io::Result<()> {
                #(
                    ::binary_mesh_codec::Serializable::serialize(&self.#field_names, writer)?;
                )*
                ::std::result::Result::Ok(())
            }

            fn deserialize<__R: ::std::io::Read>(
                reader: &mut __R,
            ) -> ::std::result::Result<Self, ::binary_mesh_codec::ReadError> {
                #(
                    let #field_names = ::binary_mesh_codec::Serializable::deserialize(reader)?;
                )*
                ::std::result::Result::Ok(Self {
                    #(#field_names),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}
