#![no_main]
use amunchain_ledger::networking::broadcast::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_frame(data, 1 << 20);
});
