#![no_main]

use libfuzzer_sys::fuzz_target;
use dhkex::DhGroup;

fuzz_target!(|data: &[u8]| {
    // Split at the first NUL into prime and generator strings
    let Ok(s) = core::str::from_utf8(data) else { return };
    let (prime, generator) = s.split_once('\0').unwrap_or((s, "2"));
    if prime.len() > 128 {
        return;
    }
    if let Ok(group) = DhGroup::from_strs(prime, generator) {
        let _ = group.validate_public_key(group.generator());
    }
});
