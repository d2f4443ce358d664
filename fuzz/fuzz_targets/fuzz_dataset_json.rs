//! Fuzz target for dataset loading.
//!
//! Malformed JSON or records must come back as errors, and anything that
//! loads must be usable by the picker.

#![no_main]

use emojipick::{Dataset, EmojiPicker, PickerOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(dataset) = Dataset::from_json(data) else {
        return;
    };
    if let Ok(mut picker) = EmojiPicker::new(&dataset, PickerOptions::default()) {
        picker.set_query("a");
        picker.set_query("");
        picker.scroll_to(u32::MAX);
    }
});
