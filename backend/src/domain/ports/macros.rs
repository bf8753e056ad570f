//! `define_port_error!`: error enums for repository and adapter ports.
//!
//! Every port reports failures through a small enum whose variants carry a
//! message or an offending value. The macro derives `thiserror::Error`
//! (plus `Clone` and `PartialEq` so services and mocks can compare them) and
//! adds one snake_case constructor per variant. Constructor parameters take
//! `impl Into<T>`, so adapters can pass `&str` where the field is a `String`.
//!
//! ```
//! use thing_repository::domain::ports::{TokenIssuerError, UserRepositoryError};
//!
//! let taken = UserRepositoryError::duplicate_email("ada@example.com");
//! assert_eq!(taken.to_string(), "email already registered: ada@example.com");
//! assert_eq!(UserRepositoryError::empty_patch(), UserRepositoryError::EmptyPatch);
//!
//! let expired = TokenIssuerError::expired();
//! assert_eq!(expired.to_string(), "token is expired");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    // Unit variant: `EmptyPatch` becomes `empty_patch()`.
    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@fields $variant [] [] $( $field : $ty, )*);
    };

    // Fields are folded one at a time into parameter and initialiser lists.
    (@fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Shaped like the adapter errors, with a non-string field.
        pub enum GrantStoreError {
            Query { message: String } => "grant query failed: {message}",
            Limit { max: u32 } => "at most {max} grants",
            Conflict { email: String, object_id: i64 } => "{email} already holds {object_id}",
            Closed => "grant store closed",
        }
    }

    #[rstest]
    #[case(GrantStoreError::query("timeout"), "grant query failed: timeout")]
    #[case(GrantStoreError::limit(4_u32), "at most 4 grants")]
    #[case(GrantStoreError::conflict("a@x.com", 9_i64), "a@x.com already holds 9")]
    #[case(GrantStoreError::closed(), "grant store closed")]
    fn constructors_render_their_message(#[case] error: GrantStoreError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn constructors_fill_named_fields() {
        assert_eq!(
            GrantStoreError::conflict(String::from("a@x.com"), 9_i64),
            GrantStoreError::Conflict {
                email: "a@x.com".to_owned(),
                object_id: 9,
            }
        );
    }
}
