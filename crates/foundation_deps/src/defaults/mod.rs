/* 📖 # What is the defaults client?

Typed preference storage over a named partition ("suite"). Application code depends on
the DefaultsStore trait and receives a DefaultsHandle from the Dependencies context:
- `SuiteDefaults`: the live store, one shared partition per suite name
- `InMemoryDefaults`: a private map for tests and previews
*/

mod memory;
mod suite;
mod traits;
mod value;

pub use memory::InMemoryDefaults;
pub use suite::SuiteDefaults;
pub use traits::{DefaultsHandle, DefaultsStore};
pub use value::DefaultsValue;
