//! XML generator.

use super::projection::{project, DependencyLayout};
use super::{BomGenerator, RenderContext, RenderError};
use crate::model::Bom;
use crate::schema::{
    Member, SchemaVersion, WireFormat, DEPENDENCY_GRAPH_NAMESPACE, DEPENDENCY_GRAPH_PREFIX,
};
use crate::wire::{
    CdxBom, CdxComponent, CdxContact, CdxDependency, CdxEntity, CdxExternalReference, CdxHash,
    CdxLicenseChoice, CdxLifecycle, CdxMetadata, CdxPedigree, CdxProperty, CdxService, CdxTool,
    CdxTools,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Writes CycloneDX XML for every schema version.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlGenerator;

impl XmlGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BomGenerator for XmlGenerator {
    fn generate(&self, bom: &Bom, ctx: &mut RenderContext) -> Result<String, RenderError> {
        let projected = project(bom, ctx, DependencyLayout::Nested)?;
        let writer = if ctx.is_pretty() {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };
        let mut out = XmlOut {
            writer,
            dependency_prefix: None,
        };
        out.document(&projected, ctx.target())?;
        let mut bytes = out.writer.into_inner();
        if ctx.is_pretty() {
            bytes.push(b'\n');
        }
        String::from_utf8(bytes).map_err(|e| RenderError::XmlWriter(e.to_string()))
    }

    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    fn supports(&self, _version: SchemaVersion) -> bool {
        true
    }
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
    /// Set when dependencies go into the dependency-graph extension namespace
    dependency_prefix: Option<&'static str>,
}

impl XmlOut {
    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.writer
            .write_event(event)
            .map_err(|e| RenderError::XmlWriter(e.to_string()))
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), RenderError> {
        self.event(Event::Start(element))
    }

    fn open(&mut self, name: &str) -> Result<(), RenderError> {
        self.start(BytesStart::new(name))
    }

    fn close(&mut self, name: &str) -> Result<(), RenderError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<name ...>text</name>`, or an empty element when `text` is empty.
    fn text_element(&mut self, element: BytesStart<'_>, text: &str) -> Result<(), RenderError> {
        if text.is_empty() {
            return self.event(Event::Empty(element));
        }
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        self.start(element)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(&name)
    }

    fn leaf(&mut self, name: &str, text: &str) -> Result<(), RenderError> {
        self.text_element(BytesStart::new(name), text)
    }

    fn opt_leaf(&mut self, name: &str, text: Option<&str>) -> Result<(), RenderError> {
        match text {
            Some(text) => self.leaf(name, text),
            None => Ok(()),
        }
    }

    fn flag(&mut self, name: &str, value: Option<bool>) -> Result<(), RenderError> {
        match value {
            Some(value) => self.leaf(name, if value { "true" } else { "false" }),
            None => Ok(()),
        }
    }

    /// `<wrapper><item>..</item>...</wrapper>` for non-empty `items`.
    fn text_list(
        &mut self,
        wrapper: &str,
        item: &str,
        items: &[String],
    ) -> Result<(), RenderError> {
        if items.is_empty() {
            return Ok(());
        }
        self.open(wrapper)?;
        for text in items {
            self.leaf(item, text)?;
        }
        self.close(wrapper)
    }

    fn document(&mut self, bom: &CdxBom, target: SchemaVersion) -> Result<(), RenderError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("bom");
        root.push_attribute(("xmlns", target.namespace()));
        let prefix_declaration = format!("xmlns:{DEPENDENCY_GRAPH_PREFIX}");
        if !bom.dependencies.is_empty() && !Member::BomDependenciesCore.admitted_in(target) {
            root.push_attribute((prefix_declaration.as_str(), DEPENDENCY_GRAPH_NAMESPACE));
            self.dependency_prefix = Some(DEPENDENCY_GRAPH_PREFIX);
        }
        if let Some(serial) = bom.serial_number.as_deref() {
            root.push_attribute(("serialNumber", serial));
        }
        let revision = bom.version.unwrap_or(1).to_string();
        root.push_attribute(("version", revision.as_str()));
        self.start(root)?;

        if let Some(metadata) = bom.metadata.as_ref() {
            self.metadata(metadata)?;
        }
        // Required, possibly empty, before 1.2
        if !bom.components.is_empty() || !Member::BomMetadata.admitted_in(target) {
            self.components("components", &bom.components)?;
        }
        self.services(&bom.services)?;
        self.external_references(&bom.external_references)?;
        self.dependencies(&bom.dependencies)?;
        self.properties(&bom.properties)?;

        self.close("bom")
    }

    fn metadata(&mut self, metadata: &CdxMetadata) -> Result<(), RenderError> {
        self.open("metadata")?;
        self.opt_leaf("timestamp", metadata.timestamp.as_deref())?;
        self.lifecycles(&metadata.lifecycles)?;
        if let Some(tools) = metadata.tools.as_ref() {
            self.tools(tools)?;
        }
        self.contacts("authors", "author", &metadata.authors)?;
        if let Some(component) = metadata.component.as_deref() {
            self.component(component)?;
        }
        if let Some(entity) = metadata.manufacture.as_ref() {
            self.entity("manufacture", entity)?;
        }
        if let Some(entity) = metadata.manufacturer.as_ref() {
            self.entity("manufacturer", entity)?;
        }
        if let Some(entity) = metadata.supplier.as_ref() {
            self.entity("supplier", entity)?;
        }
        self.licenses(&metadata.licenses)?;
        self.properties(&metadata.properties)?;
        self.close("metadata")
    }

    fn lifecycles(&mut self, lifecycles: &[CdxLifecycle]) -> Result<(), RenderError> {
        if lifecycles.is_empty() {
            return Ok(());
        }
        self.open("lifecycles")?;
        for lifecycle in lifecycles {
            self.open("lifecycle")?;
            self.opt_leaf("phase", lifecycle.phase.as_deref())?;
            self.opt_leaf("name", lifecycle.name.as_deref())?;
            self.opt_leaf("description", lifecycle.description.as_deref())?;
            self.close("lifecycle")?;
        }
        self.close("lifecycles")
    }

    fn tools(&mut self, tools: &CdxTools) -> Result<(), RenderError> {
        self.open("tools")?;
        match tools {
            CdxTools::Legacy(tools) => {
                for tool in tools {
                    self.tool(tool)?;
                }
            }
            CdxTools::Structured(object) => {
                if !object.components.is_empty() {
                    self.components("components", &object.components)?;
                }
                self.services(&object.services)?;
            }
        }
        self.close("tools")
    }

    fn tool(&mut self, tool: &CdxTool) -> Result<(), RenderError> {
        self.open("tool")?;
        self.opt_leaf("vendor", tool.vendor.as_deref())?;
        self.opt_leaf("name", tool.name.as_deref())?;
        self.opt_leaf("version", tool.version.as_deref())?;
        self.hashes(&tool.hashes)?;
        self.external_references(&tool.external_references)?;
        self.close("tool")
    }

    fn components(
        &mut self,
        wrapper: &str,
        components: &[CdxComponent],
    ) -> Result<(), RenderError> {
        self.open(wrapper)?;
        for component in components {
            self.component(component)?;
        }
        self.close(wrapper)
    }

    fn component(&mut self, component: &CdxComponent) -> Result<(), RenderError> {
        let mut element = BytesStart::new("component");
        if let Some(component_type) = component.component_type.as_deref() {
            element.push_attribute(("type", component_type));
        }
        if let Some(mime_type) = component.mime_type.as_deref() {
            element.push_attribute(("mime-type", mime_type));
        }
        if let Some(bom_ref) = component.bom_ref.as_deref() {
            element.push_attribute(("bom-ref", bom_ref));
        }
        self.start(element)?;

        if let Some(entity) = component.supplier.as_ref() {
            self.entity("supplier", entity)?;
        }
        if let Some(entity) = component.manufacturer.as_ref() {
            self.entity("manufacturer", entity)?;
        }
        self.contacts("authors", "author", &component.authors)?;
        self.opt_leaf("author", component.author.as_deref())?;
        self.opt_leaf("publisher", component.publisher.as_deref())?;
        self.opt_leaf("group", component.group.as_deref())?;
        self.leaf("name", &component.name)?;
        self.opt_leaf("version", component.version.as_deref())?;
        self.opt_leaf("description", component.description.as_deref())?;
        self.opt_leaf("scope", component.scope.as_deref())?;
        self.hashes(&component.hashes)?;
        self.licenses(&component.licenses)?;
        self.opt_leaf("copyright", component.copyright.as_deref())?;
        self.opt_leaf("cpe", component.cpe.as_deref())?;
        self.opt_leaf("purl", component.purl.as_deref())?;
        for id in &component.omnibor_id {
            self.leaf("omniborId", id)?;
        }
        for id in &component.swhid {
            self.leaf("swhid", id)?;
        }
        self.flag("modified", component.modified)?;
        if let Some(pedigree) = component.pedigree.as_ref() {
            self.pedigree(pedigree)?;
        }
        self.external_references(&component.external_references)?;
        self.properties(&component.properties)?;
        if !component.components.is_empty() {
            self.components("components", &component.components)?;
        }
        self.text_list("tags", "tag", &component.tags)?;

        self.close("component")
    }

    fn pedigree(&mut self, pedigree: &CdxPedigree) -> Result<(), RenderError> {
        self.open("pedigree")?;
        for (wrapper, components) in [
            ("ancestors", &pedigree.ancestors),
            ("descendants", &pedigree.descendants),
            ("variants", &pedigree.variants),
        ] {
            if !components.is_empty() {
                self.components(wrapper, components)?;
            }
        }
        self.opt_leaf("notes", pedigree.notes.as_deref())?;
        self.close("pedigree")
    }

    fn services(&mut self, services: &[CdxService]) -> Result<(), RenderError> {
        if services.is_empty() {
            return Ok(());
        }
        self.open("services")?;
        for service in services {
            self.service(service)?;
        }
        self.close("services")
    }

    fn service(&mut self, service: &CdxService) -> Result<(), RenderError> {
        let mut element = BytesStart::new("service");
        if let Some(bom_ref) = service.bom_ref.as_deref() {
            element.push_attribute(("bom-ref", bom_ref));
        }
        self.start(element)?;
        if let Some(provider) = service.provider.as_ref() {
            self.entity("provider", provider)?;
        }
        self.opt_leaf("group", service.group.as_deref())?;
        self.leaf("name", &service.name)?;
        self.opt_leaf("version", service.version.as_deref())?;
        self.opt_leaf("description", service.description.as_deref())?;
        self.text_list("endpoints", "endpoint", &service.endpoints)?;
        self.flag("authenticated", service.authenticated)?;
        self.flag("x-trust-boundary", service.x_trust_boundary)?;
        self.opt_leaf("trustZone", service.trust_zone.as_deref())?;
        self.licenses(&service.licenses)?;
        self.external_references(&service.external_references)?;
        self.properties(&service.properties)?;
        self.services(&service.services)?;
        self.text_list("tags", "tag", &service.tags)?;
        self.close("service")
    }

    fn entity(&mut self, name: &str, entity: &CdxEntity) -> Result<(), RenderError> {
        let mut element = BytesStart::new(name);
        if let Some(bom_ref) = entity.bom_ref.as_deref() {
            element.push_attribute(("bom-ref", bom_ref));
        }
        self.start(element)?;
        self.opt_leaf("name", entity.name.as_deref())?;
        for url in &entity.url {
            self.leaf("url", url)?;
        }
        for contact in &entity.contact {
            self.contact("contact", contact)?;
        }
        self.close(name)
    }

    fn contacts(
        &mut self,
        wrapper: &str,
        item: &str,
        contacts: &[CdxContact],
    ) -> Result<(), RenderError> {
        if contacts.is_empty() {
            return Ok(());
        }
        self.open(wrapper)?;
        for contact in contacts {
            self.contact(item, contact)?;
        }
        self.close(wrapper)
    }

    fn contact(&mut self, name: &str, contact: &CdxContact) -> Result<(), RenderError> {
        let mut element = BytesStart::new(name);
        if let Some(bom_ref) = contact.bom_ref.as_deref() {
            element.push_attribute(("bom-ref", bom_ref));
        }
        self.start(element)?;
        self.opt_leaf("name", contact.name.as_deref())?;
        self.opt_leaf("email", contact.email.as_deref())?;
        self.opt_leaf("phone", contact.phone.as_deref())?;
        self.close(name)
    }

    fn hashes(&mut self, hashes: &[CdxHash]) -> Result<(), RenderError> {
        if hashes.is_empty() {
            return Ok(());
        }
        self.open("hashes")?;
        for hash in hashes {
            let mut element = BytesStart::new("hash");
            element.push_attribute(("alg", hash.alg.as_str()));
            self.text_element(element, &hash.content)?;
        }
        self.close("hashes")
    }

    fn licenses(&mut self, licenses: &[CdxLicenseChoice]) -> Result<(), RenderError> {
        if licenses.is_empty() {
            return Ok(());
        }
        self.open("licenses")?;
        for choice in licenses {
            if let Some(expression) = choice.expression.as_deref() {
                let mut element = BytesStart::new("expression");
                if let Some(bom_ref) = choice.bom_ref.as_deref() {
                    element.push_attribute(("bom-ref", bom_ref));
                }
                if let Some(acknowledgement) = choice.acknowledgement.as_deref() {
                    element.push_attribute(("acknowledgement", acknowledgement));
                }
                self.text_element(element, expression)?;
                continue;
            }
            let Some(license) = choice.license.as_ref() else {
                continue;
            };
            let mut element = BytesStart::new("license");
            if let Some(bom_ref) = license.bom_ref.as_deref() {
                element.push_attribute(("bom-ref", bom_ref));
            }
            if let Some(acknowledgement) = license.acknowledgement.as_deref() {
                element.push_attribute(("acknowledgement", acknowledgement));
            }
            self.start(element)?;
            self.opt_leaf("id", license.id.as_deref())?;
            self.opt_leaf("name", license.name.as_deref())?;
            if let Some(text) = license.text.as_ref() {
                let mut element = BytesStart::new("text");
                if let Some(content_type) = text.content_type.as_deref() {
                    element.push_attribute(("content-type", content_type));
                }
                if let Some(encoding) = text.encoding.as_deref() {
                    element.push_attribute(("encoding", encoding));
                }
                self.text_element(element, &text.content)?;
            }
            self.opt_leaf("url", license.url.as_deref())?;
            self.properties(&license.properties)?;
            self.close("license")?;
        }
        self.close("licenses")
    }

    fn external_references(
        &mut self,
        references: &[CdxExternalReference],
    ) -> Result<(), RenderError> {
        if references.is_empty() {
            return Ok(());
        }
        self.open("externalReferences")?;
        for reference in references {
            let mut element = BytesStart::new("reference");
            element.push_attribute(("type", reference.reference_type.as_str()));
            self.start(element)?;
            self.leaf("url", &reference.url)?;
            self.opt_leaf("comment", reference.comment.as_deref())?;
            self.hashes(&reference.hashes)?;
            self.close("reference")?;
        }
        self.close("externalReferences")
    }

    fn properties(&mut self, properties: &[CdxProperty]) -> Result<(), RenderError> {
        if properties.is_empty() {
            return Ok(());
        }
        self.open("properties")?;
        for property in properties {
            let mut element = BytesStart::new("property");
            element.push_attribute(("name", property.name.as_str()));
            self.text_element(element, property.value.as_deref().unwrap_or_default())?;
        }
        self.close("properties")
    }

    fn dependencies(&mut self, dependencies: &[CdxDependency]) -> Result<(), RenderError> {
        if dependencies.is_empty() {
            return Ok(());
        }
        let wrapper = self.qualified("dependencies");
        let item = self.qualified("dependency");
        self.open(&wrapper)?;
        for dependency in dependencies {
            self.dependency(&item, dependency)?;
        }
        self.close(&wrapper)
    }

    /// One dependency element with its nested entries. Depth was bounded by
    /// the projection.
    fn dependency(&mut self, item: &str, dependency: &CdxDependency) -> Result<(), RenderError> {
        let mut element = BytesStart::new(item);
        element.push_attribute(("ref", dependency.dependency_ref.as_str()));
        if dependency.dependencies.is_empty() && dependency.depends_on.is_empty() {
            return self.event(Event::Empty(element));
        }
        self.start(element)?;
        for child in &dependency.dependencies {
            self.dependency(item, child)?;
        }
        for target in &dependency.depends_on {
            let mut child = BytesStart::new(item);
            child.push_attribute(("ref", target.as_str()));
            self.event(Event::Empty(child))?;
        }
        self.close(item)
    }

    fn qualified(&self, local: &str) -> String {
        match self.dependency_prefix {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }
}
