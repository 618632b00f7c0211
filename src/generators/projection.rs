//! Projection of the model onto the wire shape of one schema version.
//!
//! All version gating happens here. The XML and JSON writers serialize the
//! projected [`CdxBom`] without making further decisions, so both dialects
//! carry the same content for the same target.

use super::{RenderContext, RenderError};
use crate::model::{
    AuthorshipView, Bom, Component, Dependency, ExternalReference, Hash, License, LicenseChoice,
    LicenseIdentity, Lifecycle, Metadata, OrganizationalContact, OrganizationalEntity, Pedigree,
    Property, Service, Tool, ToolsView,
};
use crate::schema::Member;
use crate::wire::{
    CdxAttachedText, CdxBom, CdxComponent, CdxContact, CdxDependency, CdxEntity,
    CdxExternalReference, CdxHash, CdxLicense, CdxLicenseChoice, CdxLifecycle, CdxMetadata,
    CdxPedigree, CdxProperty, CdxService, CdxTool, CdxTools, CdxToolsObject, BOM_FORMAT,
};
use chrono::SecondsFormat;
use std::collections::{HashSet, VecDeque};

/// Shape of the projected dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DependencyLayout {
    /// Trees kept as they are; XML elements nest recursively.
    Nested,
    /// One entry per ref with its direct targets; JSON `dependsOn` is flat.
    Flat,
}

/// Project `bom` for the target of `ctx`.
pub(crate) fn project(
    bom: &Bom,
    ctx: &mut RenderContext,
    layout: DependencyLayout,
) -> Result<CdxBom, RenderError> {
    ctx.reset();
    let mut projector = Projector { ctx, layout };
    projector.bom(bom)
}

struct Projector<'c> {
    ctx: &'c mut RenderContext,
    layout: DependencyLayout,
}

impl Projector<'_> {
    fn gate<T>(&mut self, member: Member, value: Option<T>) -> Option<T> {
        if self.ctx.admits(member, value.is_some()) {
            value
        } else {
            None
        }
    }

    fn gate_list<T>(&mut self, member: Member, values: Vec<T>) -> Vec<T> {
        if self.ctx.admits(member, !values.is_empty()) {
            values
        } else {
            Vec::new()
        }
    }

    fn bom(&mut self, bom: &Bom) -> Result<CdxBom, RenderError> {
        let target = self.ctx.target();
        let serial_number = self.gate(Member::BomSerialNumber, bom.serial_number.clone());

        let metadata = match bom.metadata.as_ref() {
            Some(metadata) if self.ctx.admits(Member::BomMetadata, true) => {
                Some(self.metadata(metadata)?)
            }
            _ => None,
        };

        let components = self.components(&bom.components, "components")?;

        let services = if self.ctx.admits(Member::BomServices, !bom.services.is_empty()) {
            self.services(&bom.services, "services")?
        } else {
            Vec::new()
        };

        let external_references = if self
            .ctx
            .admits(Member::BomExternalReferences, !bom.external_references.is_empty())
        {
            self.external_references(&bom.external_references)?
        } else {
            Vec::new()
        };

        let dependencies = if self
            .ctx
            .admits(Member::BomDependencies, !bom.dependencies.is_empty())
        {
            match self.layout {
                DependencyLayout::Nested => {
                    self.dependency_tree(&bom.dependencies, "dependencies")?
                }
                DependencyLayout::Flat => self.flat_dependencies(&bom.dependencies)?,
            }
        } else {
            Vec::new()
        };

        let properties = if self.ctx.admits(Member::BomProperties, !bom.properties.is_empty()) {
            self.properties(&bom.properties)?
        } else {
            Vec::new()
        };

        Ok(CdxBom {
            bom_format: Some(BOM_FORMAT.to_string()),
            spec_version: Some(target.as_str().to_string()),
            serial_number,
            version: Some(bom.revision.max(1)),
            metadata,
            components,
            services,
            external_references,
            dependencies,
            properties,
        })
    }

    fn metadata(&mut self, metadata: &Metadata) -> Result<CdxMetadata, RenderError> {
        let timestamp = self.gate(
            Member::MetadataTimestamp,
            metadata
                .timestamp
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );

        let lifecycles = self.gate_list(
            Member::MetadataLifecycles,
            metadata.lifecycles.iter().map(lifecycle).collect(),
        );

        let tools = if self.ctx.admits(Member::MetadataTools, !metadata.tools.is_empty()) {
            match metadata.tools.for_version(self.ctx.target()) {
                Some(view) => Some(self.tools(view)?),
                None => None,
            }
        } else {
            None
        };

        let authors = if self
            .ctx
            .admits(Member::MetadataAuthors, !metadata.authors.is_empty())
        {
            self.contacts(&metadata.authors)
        } else {
            Vec::new()
        };

        let component = match metadata.component.as_ref() {
            Some(component) if self.ctx.admits(Member::MetadataComponent, true) => {
                Some(Box::new(self.component(component, "metadata.component".to_string())?))
            }
            _ => None,
        };

        let manufacture = match metadata.manufacture.as_ref() {
            Some(entity) if self.ctx.admits(Member::MetadataManufacture, true) => {
                Some(self.entity(entity))
            }
            _ => None,
        };
        let manufacturer = match metadata.manufacturer.as_ref() {
            Some(entity) if self.ctx.admits(Member::MetadataManufacturer, true) => {
                Some(self.entity(entity))
            }
            _ => None,
        };
        let supplier = match metadata.supplier.as_ref() {
            Some(entity) if self.ctx.admits(Member::MetadataSupplier, true) => {
                Some(self.entity(entity))
            }
            _ => None,
        };

        let licenses = if self
            .ctx
            .admits(Member::MetadataLicenses, metadata.licenses.is_some())
        {
            self.licenses(metadata.licenses.as_ref())?
        } else {
            Vec::new()
        };

        let properties = if self
            .ctx
            .admits(Member::MetadataProperties, !metadata.properties.is_empty())
        {
            self.properties(&metadata.properties)?
        } else {
            Vec::new()
        };

        Ok(CdxMetadata {
            timestamp,
            lifecycles,
            tools,
            authors,
            component,
            manufacture,
            manufacturer,
            supplier,
            licenses,
            properties,
        })
    }

    fn tools(&mut self, view: ToolsView<'_>) -> Result<CdxTools, RenderError> {
        match view {
            ToolsView::Legacy(tools) => {
                let mut projected = Vec::with_capacity(tools.len());
                for tool in &tools {
                    projected.push(self.tool(tool)?);
                }
                Ok(CdxTools::Legacy(projected))
            }
            ToolsView::Structured {
                components,
                services,
            } => {
                let mut projected = Vec::with_capacity(components.len());
                for (i, component) in components.iter().enumerate() {
                    projected.push(
                        self.component(component, format!("metadata.tools.components[{i}]"))?,
                    );
                }
                Ok(CdxTools::Structured(CdxToolsObject {
                    components: projected,
                    services: self.services(services, "metadata.tools.services")?,
                }))
            }
        }
    }

    fn tool(&mut self, tool: &Tool) -> Result<CdxTool, RenderError> {
        let external_references = if self.ctx.admits(
            Member::ToolExternalReferences,
            !tool.external_references.is_empty(),
        ) {
            self.external_references(&tool.external_references)?
        } else {
            Vec::new()
        };
        Ok(CdxTool {
            vendor: tool.vendor.clone(),
            name: tool.name.clone(),
            version: tool.version.clone(),
            hashes: self.hashes(&tool.hashes)?,
            external_references,
        })
    }

    fn components(
        &mut self,
        components: &[Component],
        field: &str,
    ) -> Result<Vec<CdxComponent>, RenderError> {
        components
            .iter()
            .enumerate()
            .map(|(i, c)| self.component(c, format!("{field}[{i}]")))
            .collect()
    }

    fn component(
        &mut self,
        component: &Component,
        segment: String,
    ) -> Result<CdxComponent, RenderError> {
        self.ctx.enter(segment)?;
        if component.name.trim().is_empty() {
            return Err(self.ctx.missing("name"));
        }

        let component_type = self
            .ctx
            .admits_value(&component.component_type)
            .then(|| component.component_type.as_wire().to_string());
        let mime_type = self.gate(Member::ComponentMimeType, component.mime_type.clone());
        let bom_ref = self.gate(Member::ComponentBomRef, component.bom_ref.clone());
        let supplier = match component.supplier.as_ref() {
            Some(entity) if self.ctx.admits(Member::ComponentSupplier, true) => {
                Some(self.entity(entity))
            }
            _ => None,
        };
        let manufacturer = match component.manufacturer.as_ref() {
            Some(entity) if self.ctx.admits(Member::ComponentManufacturer, true) => {
                Some(self.entity(entity))
            }
            _ => None,
        };

        let (authors, author) = match component.authorship.for_version(self.ctx.target()) {
            Some(AuthorshipView::Contacts(contacts)) => (self.contacts(contacts), None),
            Some(AuthorshipView::Legacy(author)) => (Vec::new(), Some(author.into_owned())),
            None => {
                self.ctx
                    .admits(Member::ComponentAuthor, !component.authorship.is_empty());
                (Vec::new(), None)
            }
        };

        let scope = match component.scope {
            Some(scope) if self.ctx.admits_value(&scope) => Some(scope.as_wire().to_string()),
            _ => None,
        };

        let pedigree = match component.pedigree.as_ref() {
            Some(pedigree) if self.ctx.admits(Member::ComponentPedigree, true) => {
                Some(self.pedigree(pedigree)?)
            }
            _ => None,
        };

        let external_references = if self.ctx.admits(
            Member::ComponentExternalReferences,
            !component.external_references.is_empty(),
        ) {
            self.external_references(&component.external_references)?
        } else {
            Vec::new()
        };

        let properties = if self
            .ctx
            .admits(Member::ComponentProperties, !component.properties.is_empty())
        {
            self.properties(&component.properties)?
        } else {
            Vec::new()
        };

        let projected = CdxComponent {
            component_type,
            mime_type,
            bom_ref,
            supplier,
            manufacturer,
            authors,
            author,
            publisher: component.publisher.clone(),
            group: component.group.clone(),
            name: component.name.clone(),
            version: component.version.clone(),
            description: component.description.clone(),
            scope,
            hashes: self.hashes(&component.hashes)?,
            licenses: self.licenses(component.licenses.as_ref())?,
            copyright: component.copyright.clone(),
            cpe: component.cpe.clone(),
            purl: component.purl.clone(),
            omnibor_id: self.gate_list(Member::ComponentOmniborId, component.omnibor_ids.clone()),
            swhid: self.gate_list(Member::ComponentSwhid, component.swhids.clone()),
            modified: self.gate(Member::ComponentModified, component.modified),
            pedigree,
            external_references,
            properties,
            components: self.components(&component.components, "components")?,
            tags: self.gate_list(Member::ComponentTags, component.tags.clone()),
        };

        self.ctx.leave();
        Ok(projected)
    }

    fn pedigree(&mut self, pedigree: &Pedigree) -> Result<CdxPedigree, RenderError> {
        Ok(CdxPedigree {
            ancestors: self.components(&pedigree.ancestors, "pedigree.ancestors")?,
            descendants: self.components(&pedigree.descendants, "pedigree.descendants")?,
            variants: self.components(&pedigree.variants, "pedigree.variants")?,
            notes: pedigree.notes.clone(),
        })
    }

    fn services(
        &mut self,
        services: &[Service],
        field: &str,
    ) -> Result<Vec<CdxService>, RenderError> {
        services
            .iter()
            .enumerate()
            .map(|(i, s)| self.service(s, format!("{field}[{i}]")))
            .collect()
    }

    fn service(&mut self, service: &Service, segment: String) -> Result<CdxService, RenderError> {
        self.ctx.enter(segment)?;
        if service.name.trim().is_empty() {
            return Err(self.ctx.missing("name"));
        }

        let properties = if self
            .ctx
            .admits(Member::ServiceProperties, !service.properties.is_empty())
        {
            self.properties(&service.properties)?
        } else {
            Vec::new()
        };

        let projected = CdxService {
            bom_ref: service.bom_ref.clone(),
            provider: service.provider.as_ref().map(|p| self.entity(p)),
            group: service.group.clone(),
            name: service.name.clone(),
            version: service.version.clone(),
            description: service.description.clone(),
            endpoints: service.endpoints.clone(),
            authenticated: service.authenticated,
            x_trust_boundary: service.x_trust_boundary,
            trust_zone: self.gate(Member::ServiceTrustZone, service.trust_zone.clone()),
            licenses: self.licenses(service.licenses.as_ref())?,
            external_references: self.external_references(&service.external_references)?,
            properties,
            services: self.services(&service.services, "services")?,
            tags: self.gate_list(Member::ServiceTags, service.tags.clone()),
        };

        self.ctx.leave();
        Ok(projected)
    }

    fn licenses(
        &mut self,
        choice: Option<&LicenseChoice>,
    ) -> Result<Vec<CdxLicenseChoice>, RenderError> {
        match choice {
            None => Ok(Vec::new()),
            Some(LicenseChoice::Expression(expression)) => {
                if !self.ctx.admits(Member::LicenseExpression, true) {
                    return Ok(Vec::new());
                }
                if expression.expression.trim().is_empty() {
                    return Err(self.ctx.missing("licenses.expression"));
                }
                Ok(vec![CdxLicenseChoice {
                    expression: Some(expression.expression.clone()),
                    bom_ref: self.gate(Member::ExpressionBomRef, expression.bom_ref.clone()),
                    acknowledgement: self.gate(
                        Member::ExpressionAcknowledgement,
                        expression.acknowledgement.map(|a| a.as_wire().to_string()),
                    ),
                    license: None,
                }])
            }
            Some(LicenseChoice::Licenses(licenses)) => licenses
                .iter()
                .enumerate()
                .map(|(i, license)| -> Result<CdxLicenseChoice, RenderError> {
                    Ok(CdxLicenseChoice {
                        license: Some(self.license(license, i)?),
                        ..CdxLicenseChoice::default()
                    })
                })
                .collect(),
        }
    }

    fn license(&mut self, license: &License, index: usize) -> Result<CdxLicense, RenderError> {
        let (id, name) = match &license.identity {
            LicenseIdentity::Id(id) => (Some(id.clone()), None),
            LicenseIdentity::Name(name) => (None, Some(name.clone())),
        };
        if license.identity.as_str().trim().is_empty() {
            return Err(self.ctx.missing(&format!("licenses[{index}].license.id")));
        }

        let properties = if self
            .ctx
            .admits(Member::LicenseProperties, !license.properties.is_empty())
        {
            self.properties(&license.properties)?
        } else {
            Vec::new()
        };

        Ok(CdxLicense {
            bom_ref: self.gate(Member::LicenseBomRef, license.bom_ref.clone()),
            id,
            name,
            acknowledgement: self.gate(
                Member::LicenseAcknowledgement,
                license.acknowledgement.map(|a| a.as_wire().to_string()),
            ),
            text: license.text.as_ref().map(|text| CdxAttachedText {
                content_type: text.content_type.clone(),
                encoding: text.encoding.clone(),
                content: text.content.clone(),
            }),
            url: self.gate(Member::LicenseUrl, license.url.clone()),
            properties,
        })
    }

    fn hashes(&mut self, hashes: &[Hash]) -> Result<Vec<CdxHash>, RenderError> {
        let mut projected = Vec::with_capacity(hashes.len());
        for (i, hash) in hashes.iter().enumerate() {
            if !self.ctx.admits_value(&hash.algorithm) {
                continue;
            }
            if hash.value.trim().is_empty() {
                return Err(self.ctx.missing(&format!("hashes[{i}].content")));
            }
            projected.push(CdxHash {
                alg: hash.algorithm.as_wire().to_string(),
                content: hash.value.clone(),
            });
        }
        Ok(projected)
    }

    fn external_references(
        &mut self,
        references: &[ExternalReference],
    ) -> Result<Vec<CdxExternalReference>, RenderError> {
        let mut projected = Vec::with_capacity(references.len());
        for (i, reference) in references.iter().enumerate() {
            if !self.ctx.admits_value(&reference.reference_type) {
                continue;
            }
            if reference.url.trim().is_empty() {
                return Err(self.ctx.missing(&format!("externalReferences[{i}].url")));
            }
            let hashes = if self.ctx.admits(
                Member::ExternalReferenceHashes,
                !reference.hashes.is_empty(),
            ) {
                self.hashes(&reference.hashes)?
            } else {
                Vec::new()
            };
            projected.push(CdxExternalReference {
                url: reference.url.clone(),
                comment: reference.comment.clone(),
                reference_type: reference.reference_type.as_wire().to_string(),
                hashes,
            });
        }
        Ok(projected)
    }

    fn properties(&mut self, properties: &[Property]) -> Result<Vec<CdxProperty>, RenderError> {
        properties
            .iter()
            .enumerate()
            .map(|(i, property)| {
                if property.name.trim().is_empty() {
                    return Err(self.ctx.missing(&format!("properties[{i}].name")));
                }
                Ok(CdxProperty {
                    name: property.name.clone(),
                    value: property.value.clone(),
                })
            })
            .collect()
    }

    fn entity(&mut self, entity: &OrganizationalEntity) -> CdxEntity {
        CdxEntity {
            bom_ref: self.gate(Member::EntityBomRef, entity.bom_ref.clone()),
            name: entity.name.clone(),
            url: entity.urls.clone(),
            contact: self.contacts(&entity.contacts),
        }
    }

    fn contacts(&mut self, contacts: &[OrganizationalContact]) -> Vec<CdxContact> {
        contacts
            .iter()
            .map(|contact| CdxContact {
                bom_ref: self.gate(Member::ContactBomRef, contact.bom_ref.clone()),
                name: contact.name.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
            })
            .collect()
    }

    fn dependency_tree(
        &mut self,
        dependencies: &[Dependency],
        field: &str,
    ) -> Result<Vec<CdxDependency>, RenderError> {
        dependencies
            .iter()
            .enumerate()
            .map(|(i, d)| self.dependency_node(d, format!("{field}[{i}]")))
            .collect()
    }

    fn dependency_node(
        &mut self,
        dependency: &Dependency,
        segment: String,
    ) -> Result<CdxDependency, RenderError> {
        self.ctx.enter(segment)?;
        if dependency.dependency_ref.trim().is_empty() {
            return Err(self.ctx.missing("ref"));
        }
        let projected = CdxDependency {
            dependency_ref: dependency.dependency_ref.clone(),
            depends_on: Vec::new(),
            dependencies: self.dependency_tree(&dependency.dependencies, "dependencies")?,
        };
        self.ctx.leave();
        Ok(projected)
    }

    /// Dependency entries with their direct targets. Entries nested below
    /// the first level are hoisted to the top so no edge is lost.
    fn flat_dependencies(
        &mut self,
        dependencies: &[Dependency],
    ) -> Result<Vec<CdxDependency>, RenderError> {
        let mut projected = Vec::with_capacity(dependencies.len());
        let mut seen = HashSet::new();
        let mut queue: VecDeque<&Dependency> = dependencies.iter().collect();

        while let Some(dependency) = queue.pop_front() {
            if dependency.dependency_ref.trim().is_empty() {
                return Err(self
                    .ctx
                    .missing(&format!("dependencies[{}].ref", projected.len())));
            }
            for child in &dependency.dependencies {
                if !child.dependencies.is_empty() {
                    queue.push_back(child);
                }
            }
            let direct: Vec<String> = dependency.direct_refs().map(str::to_string).collect();
            if !seen.insert((dependency.dependency_ref.as_str(), direct.clone())) {
                continue;
            }
            projected.push(CdxDependency {
                dependency_ref: dependency.dependency_ref.clone(),
                depends_on: direct,
                dependencies: Vec::new(),
            });
        }
        Ok(projected)
    }
}

fn lifecycle(lifecycle: &Lifecycle) -> CdxLifecycle {
    match lifecycle {
        Lifecycle::Phase(phase) => CdxLifecycle {
            phase: Some(phase.as_wire().to_string()),
            ..CdxLifecycle::default()
        },
        Lifecycle::Custom { name, description } => CdxLifecycle {
            phase: None,
            name: Some(name.clone()),
            description: description.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Authorship, ComponentType, ExternalReferenceType, HashAlgorithm, LicenseExpression,
    };
    use crate::schema::SchemaVersion;

    fn project_at(bom: &Bom, target: SchemaVersion) -> Result<CdxBom, RenderError> {
        project(bom, &mut RenderContext::new(target), DependencyLayout::Flat)
    }

    fn sample() -> Bom {
        let mut component = Component::new(ComponentType::Library, "acme").with_version("1.0");
        component.bom_ref = Some("pkg:acme".to_string());
        component.hashes = vec![
            Hash::new(HashAlgorithm::Sha256, "ab"),
            Hash::new(HashAlgorithm::Blake3, "cd"),
        ];
        component.external_references = vec![
            ExternalReference::new(ExternalReferenceType::Vcs, "https://example.com/acme.git"),
            ExternalReference::new(ExternalReferenceType::ReleaseNotes, "https://example.com/rn"),
        ];
        component.properties = vec![Property::new("k", "v")];

        let mut bom = Bom::new();
        bom.serial_number = Some("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_string());
        bom.components = vec![component];
        bom.dependencies = vec![Dependency::new("pkg:acme")];
        bom
    }

    #[test]
    fn test_gating_at_1_0() {
        let projected = project_at(&sample(), SchemaVersion::V1_0).unwrap();
        assert_eq!(projected.spec_version.as_deref(), Some("1.0"));
        assert!(projected.serial_number.is_none());
        assert!(projected.dependencies.is_empty());
        let component = &projected.components[0];
        assert!(component.bom_ref.is_none());
        assert_eq!(component.hashes.len(), 1);
        assert!(component.external_references.is_empty());
        assert!(component.properties.is_empty());
    }

    #[test]
    fn test_enum_values_dropped_below_introduction() {
        let projected = project_at(&sample(), SchemaVersion::V1_3).unwrap();
        let component = &projected.components[0];
        assert_eq!(component.hashes.len(), 2);
        assert_eq!(component.external_references.len(), 1);
        assert_eq!(component.external_references[0].reference_type, "vcs");
        assert_eq!(component.properties.len(), 1);

        let projected = project_at(&sample(), SchemaVersion::V1_4).unwrap();
        assert_eq!(projected.components[0].external_references.len(), 2);
    }

    #[test]
    fn test_missing_name_reports_path() {
        let mut bom = sample();
        bom.components[0]
            .components
            .push(Component::new(ComponentType::Library, " "));
        match project_at(&bom, SchemaVersion::V1_4) {
            Err(RenderError::MissingField { path }) => {
                assert_eq!(path, "components[0].components[0].name");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_expression_dropped_at_1_0() {
        let mut bom = sample();
        bom.components[0].licenses = Some(LicenseChoice::Expression(LicenseExpression::new(
            "MIT OR Apache-2.0",
        )));
        assert!(project_at(&bom, SchemaVersion::V1_0).unwrap().components[0]
            .licenses
            .is_empty());
        let projected = project_at(&bom, SchemaVersion::V1_1).unwrap();
        assert_eq!(
            projected.components[0].licenses[0].expression.as_deref(),
            Some("MIT OR Apache-2.0")
        );
    }

    #[test]
    fn test_authorship_forms() {
        let mut bom = sample();
        bom.components[0].authorship =
            Authorship::contacts(vec![OrganizationalContact::named("Jane")]);
        let at_1_6 = project_at(&bom, SchemaVersion::V1_6).unwrap();
        assert_eq!(at_1_6.components[0].authors.len(), 1);
        assert!(at_1_6.components[0].author.is_none());

        let at_1_4 = project_at(&bom, SchemaVersion::V1_4).unwrap();
        assert!(at_1_4.components[0].authors.is_empty());
        assert_eq!(at_1_4.components[0].author.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_nested_dependencies_are_hoisted() {
        let mut bom = sample();
        let mut child = Dependency::new("b");
        child.dependencies.push(Dependency::new("c"));
        let mut root = Dependency::new("a");
        root.dependencies.push(child);
        bom.dependencies = vec![root];

        let projected = project_at(&bom, SchemaVersion::V1_5).unwrap();
        let refs: Vec<_> = projected
            .dependencies
            .iter()
            .map(|d| (d.dependency_ref.as_str(), d.depends_on.clone()))
            .collect();
        assert_eq!(
            refs,
            vec![("a", vec!["b".to_string()]), ("b", vec!["c".to_string()])]
        );
    }

    #[test]
    fn test_nested_layout_keeps_the_tree() {
        let mut bom = sample();
        bom.dependencies = vec![Dependency::new("a")
            .depends_on("d")
            .with_child(Dependency::new("b").with_child(Dependency::new("c")))];

        let mut ctx = RenderContext::new(SchemaVersion::V1_2);
        let projected = project(&bom, &mut ctx, DependencyLayout::Nested).unwrap();
        assert_eq!(projected.dependencies.len(), 1);
        let a = &projected.dependencies[0];
        assert_eq!(a.dependency_ref, "a");
        assert!(a.depends_on.is_empty());
        let refs: Vec<_> = a.dependencies.iter().map(|d| d.dependency_ref.as_str()).collect();
        assert_eq!(refs, vec!["d", "b"]);
        assert_eq!(a.dependencies[1].dependencies[0].dependency_ref, "c");
    }

    #[test]
    fn test_nested_dependency_depth_is_guarded() {
        let mut bom = sample();
        let mut dependency = Dependency::new("leaf");
        for i in 0..5 {
            dependency = Dependency::new(format!("d{i}")).with_child(dependency);
        }
        bom.dependencies = vec![dependency];

        let mut ctx = RenderContext::new(SchemaVersion::V1_2).with_max_depth(5);
        let err = project(&bom, &mut ctx, DependencyLayout::Nested).unwrap_err();
        assert!(matches!(err, RenderError::NestingTooDeep { max_depth: 5 }));
        let mut ctx = RenderContext::new(SchemaVersion::V1_2).with_max_depth(6);
        assert!(project(&bom, &mut ctx, DependencyLayout::Nested).is_ok());
    }

    #[test]
    fn test_nested_dependency_without_ref_names_the_path() {
        let mut bom = sample();
        bom.dependencies = vec![Dependency::new("a").with_child(Dependency::new(" "))];
        let mut ctx = RenderContext::new(SchemaVersion::V1_4);
        let err = project(&bom, &mut ctx, DependencyLayout::Nested).unwrap_err();
        match err {
            RenderError::MissingField { path } => {
                assert_eq!(path, "dependencies[0].dependencies[0].ref");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_revision_is_carried() {
        let mut bom = sample();
        bom.revision = 7;
        assert_eq!(project_at(&bom, SchemaVersion::V1_2).unwrap().version, Some(7));
    }
}
