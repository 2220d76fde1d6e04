pub mod diagnostics;
pub mod error;
pub mod facet;
pub mod ids;
pub mod term;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog};
pub use error::{ModelError, Result};
pub use facet::{Facet, LabelKind};
pub use ids::{DRS_PREFIX, DrsId, DrsStem, Realization};
pub use term::{FacetResolution, ResolvedFacets, TagSet, Term};
