#![no_main]

use echoes_store::{CompositionRepository, CompositionStore, MemoryStorage, COMPOSITIONS_KEY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut store = CompositionStore::new(MemoryStorage::with_value(COMPOSITIONS_KEY, text));
    let loaded = store.load();
    if let Some(first) = loaded.first() {
        let remaining = store.remove(&first.id).expect("memory storage never fails");
        assert!(remaining.iter().all(|c| c.id != first.id));
    }
});
