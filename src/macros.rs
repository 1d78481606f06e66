/// Declares a closed IDMEF vocabulary.
///
/// Every value owns the exact keyword used on the wire. Reading is lenient: the
/// input is compared with hyphens removed and case folded, so `IPv4-Addr`,
/// `ipv4addr` and `ipv4-addr` all select the same value. Writing always emits the
/// canonical keyword.
macro_rules! idmef_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $keyword:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical wire keyword.
            pub fn keyword(self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)+
                }
            }

            pub fn from_wire(value: &str) -> std::result::Result<Self, $crate::err::ValueError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| {
                        $crate::model::vocabulary::keyword_matches(value, candidate.keyword())
                    })
                    .ok_or_else(|| $crate::err::ValueError::UnknownKeyword {
                        enum_name: stringify!($name),
                        value: value.to_owned(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.keyword())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::err::ValueError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_wire(s)
            }
        }

        impl $crate::model::vocabulary::Keyword for $name {
            fn keyword(self) -> &'static str {
                $name::keyword(self)
            }

            fn from_wire(value: &str) -> std::result::Result<Self, $crate::err::ValueError> {
                $name::from_wire(value)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.keyword())
            }
        }
    };
}
