#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|values: Vec<u16>| {
    owned_avl::model::run_balance_check(values.into_iter().map(u32::from).collect());
});
