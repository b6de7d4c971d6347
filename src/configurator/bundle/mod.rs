//! Token Server configuration bundle.
//!
//! The bundle is a zip archive holding `config.json` (decoded into an
//! [`OptionSet`]) and PEM certificates under `certificates/` (collected into a
//! [`CertificateSet`]). Both invariants (non-empty resource gateway list,
//! non-empty certificate set) are enforced at load time.

mod archive;
mod certificates;
mod options;

pub use archive::{ConfigurationBundle, load_bundle};
pub use certificates::{CertificateSet, PEM_CERTIFICATE_HEADER};
pub use options::{OptionSet, ServerPublicKey};
