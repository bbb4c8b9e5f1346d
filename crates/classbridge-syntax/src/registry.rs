//! Adapter lookup by [`Language`].
//!
//! Built-in readers and writers are installed on first lookup, one per
//! language. Registering an adapter replaces the one for its language.

use crate::traits::{Language, Reader, Writer};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

struct Adapters {
    readers: HashMap<Language, &'static dyn Reader>,
    writers: HashMap<Language, &'static dyn Writer>,
}

static ADAPTERS: LazyLock<RwLock<Adapters>> = LazyLock::new(|| RwLock::new(Adapters::builtin()));

impl Adapters {
    #[allow(unused_mut)]
    fn builtin() -> Self {
        let mut adapters = Adapters {
            readers: HashMap::new(),
            writers: HashMap::new(),
        };
        #[cfg(feature = "read-swift")]
        {
            adapters
                .readers
                .insert(Language::Swift, &crate::input::swift::SWIFT_READER);
        }
        #[cfg(feature = "read-python")]
        {
            adapters
                .readers
                .insert(Language::Python, &crate::input::python::PYTHON_READER);
        }
        #[cfg(feature = "write-swift")]
        {
            adapters
                .writers
                .insert(Language::Swift, &crate::output::swift::SWIFT_WRITER);
        }
        #[cfg(feature = "write-python")]
        {
            adapters
                .writers
                .insert(Language::Python, &crate::output::python::PYTHON_WRITER);
        }
        adapters
    }
}

/// Installs `reader` for its language, returning the one it replaces.
pub fn register_reader(reader: &'static dyn Reader) -> Option<&'static dyn Reader> {
    ADAPTERS
        .write()
        .unwrap()
        .readers
        .insert(reader.language(), reader)
}

/// Installs `writer` for its language, returning the one it replaces.
pub fn register_writer(writer: &'static dyn Writer) -> Option<&'static dyn Writer> {
    ADAPTERS
        .write()
        .unwrap()
        .writers
        .insert(writer.language(), writer)
}

pub fn reader_for(language: Language) -> Option<&'static dyn Reader> {
    ADAPTERS.read().unwrap().readers.get(&language).copied()
}

pub fn writer_for(language: Language) -> Option<&'static dyn Writer> {
    ADAPTERS.read().unwrap().writers.get(&language).copied()
}

/// The reader for a source file, chosen by extension.
pub fn reader_for_path(path: &Path) -> Option<&'static dyn Reader> {
    let ext = path.extension()?.to_str()?;
    reader_for(Language::from_extension(ext)?)
}

/// Languages that can be both read and written.
pub fn translatable_languages() -> Vec<Language> {
    let adapters = ADAPTERS.read().unwrap();
    Language::ALL
        .into_iter()
        .filter(|lang| adapters.readers.contains_key(lang) && adapters.writers.contains_key(lang))
        .collect()
}
