mod advisory_resolver;
mod component_filter;
mod document_merger;
mod event_translator;
mod metadata_generator;
mod reference_canonicalizer;
mod statement_composer;

pub use advisory_resolver::AdvisoryResolver;
pub use component_filter::ComponentFilter;
pub use document_merger::DocumentMerger;
pub use event_translator::EventTranslator;
pub use metadata_generator::MetadataGenerator;
pub use reference_canonicalizer::ReferenceCanonicalizer;
pub use statement_composer::StatementComposer;
