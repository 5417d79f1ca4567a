//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements          | Connects to                 |
//! |------------------|---------------------|-----------------------------|
//! | `memory`         | SecurityRepository  | Plain in-process fields     |
//! | `stored`         | SecurityRepository  | Any StoragePort (postcard)  |
//! | `store`          | StoragePort         | HashMap / directory of files|
//! |                  | ConfigPort          |                             |
//! | `label_analyzer` | ImageAnalyzer       | Camera classifier labels    |
//! | `log_listener`   | StatusListener      | `log` facade                |

pub mod label_analyzer;
pub mod log_listener;
pub mod memory;
pub mod store;
pub mod stored;
