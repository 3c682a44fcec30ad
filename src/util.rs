//! Macros used across the project which needed a home

/// Builder-style setters, e.g. `width(w: usize) => width = Some(w)` makes `fn width(mut self, w: usize) -> Self`.
macro_rules! setters {
    ( $(
        $name:ident $( ( $($pname:ident: $ptype:ty),* $(,)? ) )?  => $field:ident = $value:expr
    ),* $(,)? ) => {
        $(
            pub fn $name(mut self $( , $( $pname: $ptype ),* )?) -> Self {
                self.$field = $value;
                self
            }
        )*
    };
}

pub(crate) use setters;
