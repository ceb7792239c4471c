//! XSD simple types
//!
//! Named simple types come in three shapes:
//! - restriction of a base type with facets (`SimpleType`)
//! - list of an item type (`ListType`), optionally restricted
//! - union of member types (`UnionType`)

use crate::names::QualifiedName;

use super::declarations::Documentation;
use super::SchemaHost;

/// Constraining facets of a restriction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Facets {
    /// `length`
    pub length: Option<u32>,
    /// `minLength`
    pub min_length: Option<u32>,
    /// `maxLength`
    pub max_length: Option<u32>,
    /// `pattern`
    pub pattern: Option<String>,
    /// `enumeration` values in insertion order
    pub enumerations: Vec<String>,
    /// `whiteSpace`
    pub white_space: Option<String>,
    /// `maxInclusive`
    pub max_inclusive: Option<String>,
    /// `maxExclusive`
    pub max_exclusive: Option<String>,
    /// `minExclusive`
    pub min_exclusive: Option<String>,
    /// `minInclusive`
    pub min_inclusive: Option<String>,
    /// `totalDigits`
    pub total_digits: Option<u32>,
    /// `fractionDigits`
    pub fraction_digits: Option<u32>,
}

impl Facets {
    /// True when no facet is set
    pub fn is_empty(&self) -> bool {
        self.length.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.enumerations.is_empty()
            && self.white_space.is_none()
            && self.max_inclusive.is_none()
            && self.max_exclusive.is_none()
            && self.min_exclusive.is_none()
            && self.min_inclusive.is_none()
            && self.total_digits.is_none()
            && self.fraction_digits.is_none()
    }
}

/// Named simple type derived by restriction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleType {
    name: String,
    base: Option<QualifiedName>,
    facets: Facets,
    final_derivation: Option<String>,
    documentation: Option<Documentation>,
}

impl SimpleType {
    /// Create an empty simple type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            facets: Facets::default(),
            final_derivation: None,
            documentation: None,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Restriction base; `None` means the schema's `string`
    pub fn base(&self) -> Option<&QualifiedName> {
        self.base.as_ref()
    }

    /// Facets
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /// `final`
    pub fn final_derivation(&self) -> Option<&str> {
        self.final_derivation.as_deref()
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// Named list type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListType {
    name: String,
    item_type: Option<QualifiedName>,
    facets: Facets,
    documentation: Option<Documentation>,
}

impl ListType {
    /// Create a list type with the default item type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: None,
            facets: Facets::default(),
            documentation: None,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item type; `None` means the schema's `string`
    pub fn item_type(&self) -> Option<&QualifiedName> {
        self.item_type.as_ref()
    }

    /// Facets applied around the list
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /// True when the list must be wrapped in a restriction
    pub fn is_restricted(&self) -> bool {
        !self.facets.is_empty()
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// Named union type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    name: String,
    member_types: Vec<QualifiedName>,
    documentation: Option<Documentation>,
}

impl UnionType {
    /// Create a union with no members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_types: Vec::new(),
            documentation: None,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member types
    pub fn member_types(&self) -> &[QualifiedName] {
        &self.member_types
    }

    /// Documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }
}

/// Builder for a named restriction simple type
#[derive(Debug)]
pub struct SimpleTypeBuilder<P> {
    parent: P,
    simple_type: SimpleType,
}

impl<P: SchemaHost> SimpleTypeBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            simple_type: SimpleType::new(name),
        }
    }

    /// Set the restriction base
    pub fn base(mut self, base: impl Into<QualifiedName>) -> Self {
        self.simple_type.base = Some(base.into());
        self
    }

    /// Append an enumeration value
    pub fn enumeration(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.enumerations.push(value.into());
        self
    }

    /// Append several enumeration values
    pub fn enumerations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.simple_type
            .facets
            .enumerations
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Set `pattern`
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.simple_type.facets.pattern = Some(pattern.into());
        self
    }

    /// Set `length`
    pub fn length(mut self, length: u32) -> Self {
        self.simple_type.facets.length = Some(length);
        self
    }

    /// Set `minLength`
    pub fn min_length(mut self, length: u32) -> Self {
        self.simple_type.facets.min_length = Some(length);
        self
    }

    /// Set `maxLength`
    pub fn max_length(mut self, length: u32) -> Self {
        self.simple_type.facets.max_length = Some(length);
        self
    }

    /// Set `minInclusive`
    pub fn min_inclusive(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.min_inclusive = Some(value.into());
        self
    }

    /// Set `maxInclusive`
    pub fn max_inclusive(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.max_inclusive = Some(value.into());
        self
    }

    /// Set `minExclusive`
    pub fn min_exclusive(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.min_exclusive = Some(value.into());
        self
    }

    /// Set `maxExclusive`
    pub fn max_exclusive(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.max_exclusive = Some(value.into());
        self
    }

    /// Set `totalDigits`
    pub fn total_digits(mut self, digits: u32) -> Self {
        self.simple_type.facets.total_digits = Some(digits);
        self
    }

    /// Set `fractionDigits`
    pub fn fraction_digits(mut self, digits: u32) -> Self {
        self.simple_type.facets.fraction_digits = Some(digits);
        self
    }

    /// Set `whiteSpace` (`preserve`, `replace`, `collapse`)
    pub fn white_space(mut self, value: impl Into<String>) -> Self {
        self.simple_type.facets.white_space = Some(value.into());
        self
    }

    /// Set `final`
    pub fn final_derivation(mut self, value: impl Into<String>) -> Self {
        self.simple_type.final_derivation = Some(value.into());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.simple_type.documentation = Some(documentation.into());
        self
    }

    /// Register the type and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_simple_type(self.simple_type);
        parent
    }
}

/// Builder for a named list type
#[derive(Debug)]
pub struct ListTypeBuilder<P> {
    parent: P,
    list_type: ListType,
}

impl<P: SchemaHost> ListTypeBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            list_type: ListType::new(name),
        }
    }

    /// Set the item type
    pub fn item_type(mut self, item_type: impl Into<QualifiedName>) -> Self {
        self.list_type.item_type = Some(item_type.into());
        self
    }

    /// Set `minLength` (number of items)
    pub fn min_length(mut self, length: u32) -> Self {
        self.list_type.facets.min_length = Some(length);
        self
    }

    /// Set `maxLength` (number of items)
    pub fn max_length(mut self, length: u32) -> Self {
        self.list_type.facets.max_length = Some(length);
        self
    }

    /// Set `pattern`
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.list_type.facets.pattern = Some(pattern.into());
        self
    }

    /// Append an enumeration value
    pub fn enumeration(mut self, value: impl Into<String>) -> Self {
        self.list_type.facets.enumerations.push(value.into());
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.list_type.documentation = Some(documentation.into());
        self
    }

    /// Register the type and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_list_type(self.list_type);
        parent
    }
}

/// Builder for a named union type
#[derive(Debug)]
pub struct UnionTypeBuilder<P> {
    parent: P,
    union_type: UnionType,
}

impl<P: SchemaHost> UnionTypeBuilder<P> {
    pub(crate) fn new(parent: P, name: String) -> Self {
        Self {
            parent,
            union_type: UnionType::new(name),
        }
    }

    /// Replace the member type list
    pub fn member_types<I, Q>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QualifiedName>,
    {
        self.union_type.member_types = members.into_iter().map(Into::into).collect();
        self
    }

    /// Attach documentation
    pub fn documentation(mut self, documentation: impl Into<Documentation>) -> Self {
        self.union_type.documentation = Some(documentation.into());
        self
    }

    /// Register the type and return to the document
    pub fn end(self) -> P {
        let mut parent = self.parent;
        parent.schema_mut().insert_union_type(self.union_type);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[derive(Debug, Default)]
    struct Host {
        schema: Schema,
    }

    impl SchemaHost for Host {
        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn schema_mut(&mut self) -> &mut Schema {
            &mut self.schema
        }
    }

    #[test]
    fn test_facets_empty() {
        assert!(Facets::default().is_empty());
        let facets = Facets {
            pattern: Some("[a-z]+".to_string()),
            ..Facets::default()
        };
        assert!(!facets.is_empty());
    }

    #[test]
    fn test_simple_type_enumerations_append() {
        let host = Host::default()
            .simple_type("Status")
            .enumeration("active")
            .enumerations(["inactive", "banned"])
            .end();
        let status = &host.schema.simple_types()["Status"];
        assert_eq!(status.facets().enumerations, vec!["active", "inactive", "banned"]);
        assert!(status.base().is_none());
    }

    #[test]
    fn test_list_type_restriction_detection() {
        let host = Host::default()
            .list_type("Plain")
            .end()
            .list_type("Codes")
            .item_type("xsd:token")
            .enumeration("A")
            .enumeration("B")
            .end();
        assert!(!host.schema.list_types()["Plain"].is_restricted());
        let codes = &host.schema.list_types()["Codes"];
        assert!(codes.is_restricted());
        assert_eq!(codes.facets().enumerations.len(), 2);
    }

    #[test]
    fn test_union_member_types_replace() {
        let host = Host::default()
            .union_type("Id")
            .member_types(["xsd:int", "xsd:string"])
            .member_types(["xsd:token"])
            .end();
        let members: Vec<&str> = host.schema.union_types()["Id"]
            .member_types()
            .iter()
            .map(|m| m.as_str())
            .collect();
        assert_eq!(members, vec!["xsd:token"]);
    }
}
