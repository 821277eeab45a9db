//! Declarative macros that turn schema declarations into Rust types
//!
//! Every complex type, polymorphic family and enumeration in the crate is
//! declared through one of these macros so that field order, optionality and
//! wire names are written down exactly once.
//!
//! Field kinds:
//! - `req T`: required element, exactly once
//! - `opt T`: `minOccurs="0"` element, `Option<T>`
//! - `vec T`: repeated element, `Vec<T>` (empty, never absent)

/// Rust type of a declared field
macro_rules! pbm_field_ty {
    (req $ty:ty) => { $ty };
    (opt $ty:ty) => { ::std::option::Option<$ty> };
    (vec $ty:ty) => { ::std::vec::Vec<$ty> };
}

/// Decode one declared field from its parent element
macro_rules! pbm_read_field {
    ($element:expr, req, $xml:literal) => {
        $crate::codec::read_required($element, $xml)
    };
    ($element:expr, opt, $xml:literal) => {
        $crate::codec::read_optional($element, $xml)
    };
    ($element:expr, vec, $xml:literal) => {
        $crate::codec::read_repeated($element, $xml)
    };
}

/// Encode one declared field into the open parent element
macro_rules! pbm_write_field {
    ($writer:expr, req, $xml:literal, $value:expr) => {
        $writer.write_element($xml, $value)?
    };
    ($writer:expr, opt, $xml:literal, $value:expr) => {
        $writer.write_optional($xml, $value)?
    };
    ($writer:expr, vec, $xml:literal, $value:expr) => {
        $writer.write_all($xml, $value)?
    };
}

/// Declare a schema complex type with its XML codec.
///
/// An optional `: Base as field` clause embeds the base type's fields first,
/// which is how single-level `extends` is expressed.
macro_rules! pbm_type {
    (
        $(#[$meta:meta])*
        $name:ident $(: $base_ty:ident as $base:ident)? {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $kind:ident $ty:ty => $xml:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                #[doc = concat!("Fields inherited from `", stringify!($base_ty), "`")]
                #[serde(flatten)]
                pub $base: $base_ty,
            )?
            $(
                $(#[$fmeta])*
                #[serde(rename = $xml)]
                pub $field: pbm_field_ty!($kind $ty),
            )*
        }

        impl $crate::codec::XmlType for $name {
            const TYPE_NAME: &'static str = stringify!($name);
        }

        impl $crate::codec::ToXml for $name {
            #[allow(unused_variables)]
            fn write_children(
                &self,
                writer: &mut $crate::codec::XmlWriter,
            ) -> $crate::error::Result<()> {
                $( $crate::codec::ToXml::write_children(&self.$base, writer)?; )?
                $( pbm_write_field!(writer, $kind, $xml, &self.$field); )*
                Ok(())
            }
        }

        impl $crate::codec::FromXml for $name {
            #[allow(unused_variables)]
            fn from_xml(
                element: &$crate::documents::Element,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $base: <$base_ty as $crate::codec::FromXml>::from_xml(element)?, )?
                    $( $field: pbm_read_field!(element, $kind, $xml)?, )*
                })
            }
        }
    };
}

/// Declare a polymorphic slot: a base type and its schema subtypes,
/// discriminated on the wire by `xsi:type`.
///
/// A missing `xsi:type` decodes as the base variant; any name outside the
/// family is an [`Error::UnknownType`](crate::error::Error::UnknownType).
macro_rules! pbm_family {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(#[$bmeta:meta])*
            base $base_variant:ident($base_ty:ident),
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(#[$bmeta])*
            $base_variant($base_ty),
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// Schema name of the concrete type held
            pub fn type_name(&self) -> &'static str {
                match self {
                    Self::$base_variant(_) => <$base_ty as $crate::codec::XmlType>::TYPE_NAME,
                    $( Self::$variant(_) => <$ty as $crate::codec::XmlType>::TYPE_NAME, )+
                }
            }

            /// Schema names of every member of the family, base first
            pub fn type_names() -> &'static [&'static str] {
                &[
                    <$base_ty as $crate::codec::XmlType>::TYPE_NAME,
                    $( <$ty as $crate::codec::XmlType>::TYPE_NAME, )+
                ]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$base_variant(<$base_ty as Default>::default())
            }
        }

        impl From<$base_ty> for $name {
            fn from(value: $base_ty) -> Self {
                Self::$base_variant(value)
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        // JSON form is a single-entry map keyed by the schema type name,
        // the same name the XML form carries in `xsi:type`.
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(Some(1))?;
                match self {
                    Self::$base_variant(value) => map.serialize_entry(self.type_name(), value)?,
                    $( Self::$variant(value) => map.serialize_entry(self.type_name(), value)?, )+
                }
                map.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                struct FamilyVisitor;

                impl<'de> serde::de::Visitor<'de> for FamilyVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        write!(
                            f,
                            "a single-entry map keyed by a {} type name",
                            <$name as $crate::codec::XmlType>::TYPE_NAME
                        )
                    }

                    fn visit_map<A: serde::de::MapAccess<'de>>(
                        self,
                        mut map: A,
                    ) -> ::std::result::Result<$name, A::Error> {
                        let key: String = match map.next_key()? {
                            Some(key) => key,
                            None => return Err(serde::de::Error::invalid_length(0, &self)),
                        };
                        let value = if key == <$base_ty as $crate::codec::XmlType>::TYPE_NAME {
                            $name::$base_variant(map.next_value()?)
                        }
                        $(
                            else if key == <$ty as $crate::codec::XmlType>::TYPE_NAME {
                                $name::$variant(map.next_value()?)
                            }
                        )+
                        else {
                            return Err(serde::de::Error::unknown_variant(&key, $name::type_names()));
                        };
                        if map.next_key::<serde::de::IgnoredAny>()?.is_some() {
                            return Err(serde::de::Error::invalid_length(2, &self));
                        }
                        Ok(value)
                    }
                }

                deserializer.deserialize_map(FamilyVisitor)
            }
        }

        impl $crate::codec::XmlType for $name {
            const TYPE_NAME: &'static str = <$base_ty as $crate::codec::XmlType>::TYPE_NAME;
        }

        impl $crate::codec::ToXml for $name {
            fn xsi_type(&self) -> Option<::std::borrow::Cow<'static, str>> {
                Some(::std::borrow::Cow::Borrowed(self.type_name()))
            }

            fn write_children(
                &self,
                writer: &mut $crate::codec::XmlWriter,
            ) -> $crate::error::Result<()> {
                match self {
                    Self::$base_variant(value) => $crate::codec::ToXml::write_children(value, writer),
                    $( Self::$variant(value) => $crate::codec::ToXml::write_children(value, writer), )+
                }
            }
        }

        impl $crate::codec::FromXml for $name {
            fn from_xml(
                element: &$crate::documents::Element,
            ) -> $crate::error::Result<Self> {
                let type_name = match element.xsi_type()? {
                    Some(qname) => qname.local_name,
                    None => {
                        return <$base_ty as $crate::codec::FromXml>::from_xml(element)
                            .map(Self::$base_variant)
                    }
                };
                if type_name == <$base_ty as $crate::codec::XmlType>::TYPE_NAME {
                    return <$base_ty as $crate::codec::FromXml>::from_xml(element)
                        .map(Self::$base_variant);
                }
                $(
                    if type_name == <$ty as $crate::codec::XmlType>::TYPE_NAME {
                        return <$ty as $crate::codec::FromXml>::from_xml(element)
                            .map(Self::$variant);
                    }
                )+
                Err($crate::error::Error::UnknownType {
                    expected: <Self as $crate::codec::XmlType>::TYPE_NAME,
                    found: type_name,
                })
            }
        }
    };
}

/// Declare a closed, string-backed enumeration.
///
/// Each constant maps to its wire token, which may differ from the Rust
/// identifier.
macro_rules! pbm_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = concat!("Wire token `", $value, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every declared constant, in schema order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire token of this constant
            pub fn value(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )+
                }
            }

            /// Look up a constant by its wire token
            pub fn from_value(value: &str) -> $crate::error::Result<Self> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    other => Err($crate::error::Error::UnknownEnumValue {
                        type_name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.value())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                Self::from_value(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.value())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let token = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_value(&token).map_err(serde::de::Error::custom)
            }
        }

        impl $crate::enums::PbmEnum for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn value(&self) -> &'static str {
                $name::value(self)
            }

            fn from_value(value: &str) -> $crate::error::Result<Self> {
                $name::from_value(value)
            }
        }

        impl $crate::codec::XmlType for $name {
            const TYPE_NAME: &'static str = stringify!($name);
        }

        impl $crate::codec::ToXml for $name {
            fn xml_text(&self) -> Option<String> {
                Some(self.value().to_string())
            }
        }

        impl $crate::codec::FromXml for $name {
            fn from_xml(
                element: &$crate::documents::Element,
            ) -> $crate::error::Result<Self> {
                Self::from_value(element.text.trim())
            }
        }
    };
}
