//! Serde wire structures for the CycloneDX JSON dialect.
//!
//! The same structs are deserialized by the JSON parser and serialized by
//! the JSON generator. Every field is optional on the way in; absent
//! values are skipped on the way out. Enumerated values stay strings here
//! and are mapped to model enums by the parser.

use serde::{Deserialize, Serialize};

pub const BOM_FORMAT: &str = "CycloneDX";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxBom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CdxMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<CdxService>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<CdxExternalReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<CdxDependency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lifecycles: Vec<CdxLifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<CdxTools>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<CdxContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<CdxComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<CdxLicenseChoice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
}

/// Lifecycle entry (1.5+): either a pre-defined `phase` or a custom `name`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxLifecycle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `metadata.tools`: an array up to 1.4, optionally an object from 1.5.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CdxTools {
    Legacy(Vec<CdxTool>),
    Structured(CdxToolsObject),
}

impl<'de> Deserialize<'de> for CdxTools {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, SeqAccess, Visitor};
        use std::fmt;

        struct ToolsVisitor;

        impl<'de> Visitor<'de> for ToolsVisitor {
            type Value = CdxTools;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of tools or an object with components/services")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut tools = Vec::new();
                while let Some(tool) = seq.next_element::<CdxTool>()? {
                    tools.push(tool);
                }
                Ok(CdxTools::Legacy(tools))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let object: CdxToolsObject =
                    Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(CdxTools::Structured(object))
            }
        }

        deserializer.deserialize_any(ToolsVisitor)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxToolsObject {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<CdxService>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<CdxHash>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<CdxExternalReference>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxComponent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(rename = "mime-type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<CdxContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<CdxHash>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<CdxLicenseChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omnibor_id: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub swhid: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pedigree: Option<CdxPedigree>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<CdxExternalReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxPedigree {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descendants: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxService {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<CdxEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<bool>,
    #[serde(rename = "x-trust-boundary", skip_serializing_if = "Option::is_none")]
    pub x_trust_boundary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_zone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<CdxLicenseChoice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<CdxExternalReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<CdxService>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One entry of a `licenses` array: `{"license": {...}}` or `{"expression": "..."}`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxLicenseChoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<CdxLicense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<String>,
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxLicense {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<CdxAttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxAttachedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    pub content: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxEntity {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub url: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<CdxContact>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxContact {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxHash {
    pub alg: String,
    pub content: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxExternalReference {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "type")]
    pub reference_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<CdxHash>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxProperty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdxDependency {
    #[serde(rename = "ref")]
    pub dependency_ref: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Nested entries. Only the XML dialect nests; JSON lists `depends_on`.
    #[serde(skip)]
    pub dependencies: Vec<CdxDependency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_accepts_both_shapes() {
        let legacy: CdxMetadata =
            serde_json::from_str(r#"{"tools":[{"vendor":"Acme","name":"scan"}]}"#).unwrap();
        assert!(matches!(legacy.tools, Some(CdxTools::Legacy(ref t)) if t.len() == 1));

        let object: CdxMetadata = serde_json::from_str(
            r#"{"tools":{"components":[{"type":"application","name":"scan"}]}}"#,
        )
        .unwrap();
        assert!(
            matches!(object.tools, Some(CdxTools::Structured(ref o)) if o.components.len() == 1)
        );
    }

    #[test]
    fn test_unknown_properties_are_ignored() {
        let bom: CdxBom = serde_json::from_str(
            r#"{"bomFormat":"CycloneDX","specVersion":"1.4","vulnerabilities":[],"x":1}"#,
        )
        .unwrap();
        assert_eq!(bom.spec_version.as_deref(), Some("1.4"));
    }

    #[test]
    fn test_empty_members_are_skipped() {
        let component = CdxComponent {
            component_type: Some("library".into()),
            name: "acme".into(),
            ..CdxComponent::default()
        };
        assert_eq!(
            serde_json::to_string(&component).unwrap(),
            r#"{"type":"library","name":"acme"}"#
        );
    }
}
