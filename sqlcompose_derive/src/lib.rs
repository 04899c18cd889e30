use proc_macro::TokenStream;

mod binary;

#[proc_macro_derive(BinaryOperator, attributes(binary))]
pub fn operator_methods(input: TokenStream) -> TokenStream {
    binary::operator_methods_impl(input)
}
