use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct BinaryDeriveInput {
    ident: syn::Ident,
    data: ast::Data<BinaryVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(binary))]
struct BinaryVariant {
    ident: syn::Ident,
    /// Logical connectives get no `where_*` helpers and render parenthesized.
    #[darling(default)]
    logical: bool,
}

pub fn operator_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match BinaryDeriveInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;

    let variants = enum_info
        .data
        .take_enum()
        .expect("only enum is supported for now");

    let logical_arms = variants.iter().map(|var| {
        let var_name = &var.ident;
        let logical = var.logical;
        quote! { #enum_name::#var_name => #logical }
    });

    let ops_methods = variants.iter().map(|var| {
        let var_name = &var.ident;
        let method = format_ident!("{}", var_name.to_string().to_snake_case());
        let doc = format!("Combine `self` and `rhs` with [`{enum_name}::{var_name}`].");

        quote! {
            #[doc = #doc]
            fn #method<R>(self, rhs: R) -> crate::Expr
            where
                R: Into<crate::Expr>,
            {
                crate::Expr::binary(self.into(), #enum_name::#var_name, rhs.into())
            }
        }
    });

    let where_methods = variants.iter().filter(|var| !var.logical).map(|var| {
        let var_name = &var.ident;
        let snake = var_name.to_string().to_snake_case();
        let where_fn = format_ident!("where_{}", snake);
        let and_where_fn = format_ident!("and_where_{}", snake);
        let or_where_fn = format_ident!("or_where_{}", snake);

        quote! {
            pub fn #where_fn<L, R>(&mut self, lhs: L, rhs: R) -> &mut Self
            where
                L: crate::IntoExpr,
                R: crate::IntoExpr,
            {
                self.where_binary_expr(None, lhs, #enum_name::#var_name, rhs)
            }

            pub fn #and_where_fn<L, R>(&mut self, lhs: L, rhs: R) -> &mut Self
            where
                L: crate::IntoExpr,
                R: crate::IntoExpr,
            {
                self.where_binary_expr(
                    Some(crate::expr::Conjunction::And),
                    lhs,
                    #enum_name::#var_name,
                    rhs,
                )
            }

            pub fn #or_where_fn<L, R>(&mut self, lhs: L, rhs: R) -> &mut Self
            where
                L: crate::IntoExpr,
                R: crate::IntoExpr,
            {
                self.where_binary_expr(
                    Some(crate::expr::Conjunction::Or),
                    lhs,
                    #enum_name::#var_name,
                    rhs,
                )
            }
        }
    });

    quote! {
        impl #enum_name {
            /// Whether this operator joins two conditions rather than comparing two values.
            pub const fn is_logical(&self) -> bool {
                match self {
                    #(#logical_arms,)*
                }
            }
        }

        /// Chainable operator methods for anything that converts into an [`Expr`](crate::Expr).
        pub trait BinaryOps: Into<crate::Expr> + Sized {
            #(#ops_methods)*
        }

        impl crate::Builder {
            #(#where_methods)*
        }
    }
    .into()
}
