#![no_main]

use libfuzzer_sys::fuzz_target;
use dhkex::ModExp;
use num_bigint::BigUint;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let third = data.len() / 3;
    let m = BigUint::from_bytes_be(&data[..third]);
    let base = BigUint::from_bytes_be(&data[third..2 * third]);
    let exponent = BigUint::from_bytes_be(&data[2 * third..]);
    if let Ok(exp) = ModExp::new(m.clone()) {
        assert_eq!(exp.pow(&base, &exponent), base.modpow(&exponent, &m));
    }
});
