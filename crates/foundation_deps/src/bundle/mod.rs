/* 📖 # What is the bundle client?

Read-only access to the application's packaged metadata and resources. Each field is
fetched independently and fails independently with a BundleError:
- `Bundle`: the live bundle, built by `main_bundle!()` or `Bundle::new`
- `StubBundle`: fails every lookup, for tests
*/

mod info;
mod main_bundle;
mod stub;
mod traits;
mod version;

pub use info::InfoDictionary;
pub use main_bundle::Bundle;
pub use stub::StubBundle;
pub use traits::{BundleHandle, BundleResourceProvider};
pub use version::SemanticVersion;
