//! C ABI for the heat source intensity models.
//!
//! Presentation layers create an opaque [`HeatSourceHandle`] with one of the
//! `heat_source_*_new` constructors, query fields and peaks through it, and
//! release it with [`heat_source_destroy`]. Every fallible call returns a
//! [`HeatSourceErrorCode`]; the message for the last failure on the calling
//! thread is available from [`heat_source_get_last_error`].
//!
//! ```c
//! RadiusProfileSpec profile;
//! profile.tag = GrowthRate;
//! profile.growth_rate.surface_radius = 25.0;
//! profile.growth_rate.growth_rate = 0.087;
//!
//! HeatSourceHandle* handle = NULL;
//! if (heat_source_super_gaussian_new(2.0, 1.0, 100.0, 0.8, 2.0, profile, &handle) != Ok) {
//!     fprintf(stderr, "%s\n", heat_source_get_last_error());
//!     return;
//! }
//!
//! IntensityFieldData* field = NULL;
//! heat_source_evaluate(handle, 20.0, NULL, &field);
//! // ... plot field->values (field->ny rows of field->nx columns) ...
//! heat_source_free_field(field);
//! heat_source_destroy(handle);
//! ```

mod error;
mod field_queries;
mod helpers;
mod instance;
mod profile;

pub use error::{heat_source_get_last_error, heat_source_get_last_error_code, HeatSourceErrorCode};
pub use field_queries::{
    heat_source_evaluate, heat_source_free_field, heat_source_peak_at_depth,
    heat_source_peak_over_depth, heat_source_reference_max, FieldStatusCode, GridSpecData,
    IntensityFieldData,
};
pub use instance::{
    heat_source_conical_new, heat_source_destroy, heat_source_exponential_new,
    heat_source_gaussian_cone_new, heat_source_super_gaussian_new, HeatSourceHandle,
};
pub use profile::RadiusProfileSpec;
