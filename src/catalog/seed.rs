//! Built-in reference dataset

use crate::state::{AccessLevel, MetadataStandard, RecordId, Repository};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn repository(
    id: u64,
    name: &str,
    description: &str,
    uri: &str,
    keywords: &[&str],
    repository_types: &[&str],
    subject_areas: &[&str],
    access: AccessLevel,
    pid_types: &[&str],
) -> Repository {
    Repository {
        id: RecordId::Catalog(id),
        name: name.to_string(),
        description: description.to_string(),
        uri: uri.to_string(),
        keywords: strings(keywords),
        repository_types: strings(repository_types),
        subject_areas: strings(subject_areas),
        access: Some(access),
        pid_types: strings(pid_types),
    }
}

fn standard(
    id: u64,
    name: &str,
    description: &str,
    uri: &str,
    keywords: &[&str],
    research_domains: &[&str],
) -> MetadataStandard {
    MetadataStandard {
        id: RecordId::Catalog(id),
        name: name.to_string(),
        description: description.to_string(),
        uri: uri.to_string(),
        keywords: strings(keywords),
        research_domains: strings(research_domains),
    }
}

pub fn repositories() -> Vec<Repository> {
    vec![
        repository(
            1,
            "Zenodo",
            "General-purpose open repository developed under the European OpenAIRE program",
            "https://zenodo.org",
            &["FAIR", "multidisciplinary"],
            &["generalist"],
            &["Natural Sciences", "Humanities", "Social Sciences", "Engineering"],
            AccessLevel::Open,
            &["DOI"],
        ),
        repository(
            2,
            "Protein Data Bank",
            "Archive of three-dimensional structural data of biological macromolecules",
            "https://www.rcsb.org",
            &["structural biology", "macromolecules"],
            &["disciplinary"],
            &["Life Sciences"],
            AccessLevel::Open,
            &["DOI"],
        ),
        repository(
            3,
            "Dryad",
            "Curated resource that makes research data discoverable and reusable",
            "https://datadryad.org",
            &["curation", "open data"],
            &["generalist"],
            &["Life Sciences", "Natural Sciences"],
            AccessLevel::Open,
            &["DOI"],
        ),
        repository(
            4,
            "Figshare",
            "Repository where users can make all of their research outputs available",
            "https://figshare.com",
            &["multidisciplinary", "open data"],
            &["generalist"],
            &["Natural Sciences", "Humanities", "Social Sciences"],
            AccessLevel::Open,
            &["DOI", "Handle"],
        ),
        repository(
            5,
            "GenBank",
            "Annotated collection of all publicly available nucleotide sequences",
            "https://www.ncbi.nlm.nih.gov/genbank",
            &["genomics", "sequences"],
            &["disciplinary"],
            &["Life Sciences"],
            AccessLevel::Open,
            &["Accession number"],
        ),
        repository(
            6,
            "ICPSR",
            "Archive of social and behavioral science research data",
            "https://www.icpsr.umich.edu",
            &["survey data", "restricted-use"],
            &["disciplinary"],
            &["Social Sciences"],
            AccessLevel::Restricted,
            &["DOI"],
        ),
        repository(
            7,
            "Harvard Dataverse",
            "Institutional and general-purpose Dataverse installation",
            "https://dataverse.harvard.edu",
            &["dataverse", "multidisciplinary"],
            &["generalist", "institutional"],
            &["Natural Sciences", "Humanities", "Social Sciences"],
            AccessLevel::Open,
            &["DOI", "Handle"],
        ),
        repository(
            8,
            "Open Science Framework",
            "Project management and archiving service for the research lifecycle",
            "https://osf.io",
            &["preregistration", "multidisciplinary"],
            &["generalist"],
            &["Natural Sciences", "Social Sciences"],
            AccessLevel::Open,
            &["DOI", "ARK"],
        ),
        repository(
            9,
            "PANGAEA",
            "Data publisher for earth and environmental science",
            "https://www.pangaea.de",
            &["earth science", "environment"],
            &["disciplinary"],
            &["Natural Sciences"],
            AccessLevel::Open,
            &["DOI"],
        ),
        repository(
            10,
            "UK Data Service",
            "Collection of economic and social data with controlled access tiers",
            "https://ukdataservice.ac.uk",
            &["economics", "census"],
            &["disciplinary", "institutional"],
            &["Social Sciences"],
            AccessLevel::Restricted,
            &["DOI"],
        ),
        repository(
            11,
            "Software Heritage",
            "Universal archive of software source code",
            "https://www.softwareheritage.org",
            &["source code", "software"],
            &["disciplinary"],
            &["Engineering"],
            AccessLevel::Open,
            &["SWHID"],
        ),
        repository(
            12,
            "EMBL-EBI BioStudies",
            "Descriptions of biological studies with links to data in other databases",
            "https://www.ebi.ac.uk/biostudies",
            &["biology", "studies"],
            &["disciplinary"],
            &["Life Sciences"],
            AccessLevel::Open,
            &["Accession number"],
        ),
    ]
}

pub fn metadata_standards() -> Vec<MetadataStandard> {
    vec![
        standard(
            101,
            "Dublin Core",
            "Basic, domain-agnostic standard for describing a wide range of resources",
            "https://www.dublincore.org/specifications/dublin-core/dcmi-terms/",
            &["general", "FAIR"],
            &["Humanities", "Social Sciences", "Natural Sciences"],
        ),
        standard(
            102,
            "DataCite Metadata Schema",
            "Core metadata properties for accurate and consistent identification of a resource",
            "https://schema.datacite.org",
            &["DOI", "citation"],
            &["Humanities", "Social Sciences", "Natural Sciences", "Engineering"],
        ),
        standard(
            103,
            "Data Documentation Initiative",
            "Standard for describing data from the social, behavioral and economic sciences",
            "https://ddialliance.org",
            &["DDI", "surveys"],
            &["Social Sciences"],
        ),
        standard(
            104,
            "Ecological Metadata Language",
            "Specification for the documentation of ecological datasets",
            "https://eml.ecoinformatics.org",
            &["EML", "ecology"],
            &["Life Sciences", "Natural Sciences"],
        ),
        standard(
            105,
            "ISO 19115",
            "Geographic information metadata standard",
            "https://www.iso.org/standard/53798.html",
            &["geospatial", "GIS"],
            &["Natural Sciences", "Engineering"],
        ),
        standard(
            106,
            "Darwin Core",
            "Terms for sharing information about biological diversity",
            "https://dwc.tdwg.org",
            &["biodiversity", "specimens"],
            &["Life Sciences"],
        ),
        standard(
            107,
            "CodeMeta",
            "Minimal metadata schema for science software and code",
            "https://codemeta.github.io",
            &["software", "JSON-LD"],
            &["Engineering"],
        ),
    ]
}
