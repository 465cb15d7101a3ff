#![no_main]

use libfuzzer_sys::fuzz_target;
use pic_resample::{ResamplingFunction, WeightsBuffer};

fuzz_target!(|data: (u16, u16, u8)| {
    let (source, destination) = (data.0 as usize, data.1 as usize);
    if source > 4096 || destination > 4096 {
        return;
    }
    let function = ResamplingFunction::from(data.2);
    match WeightsBuffer::new(source, destination, &function) {
        Ok(buffer) => {
            assert_eq!(buffer.destination_size(), destination);
            for window in buffer.windows() {
                assert!(window.right() <= source);
                assert!((window.sum() - 1.).abs() < 1e-3);
            }
        }
        Err(_) => assert!(source == 0 || destination == 0),
    }
});
