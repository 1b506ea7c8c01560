#![no_main]

use echoes_audio::{encode_to_vec, extract_pcm_data, AudioFormat, WavInfo};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(info) = WavInfo::parse(data) {
        let _ = info.duration_seconds();
        let _ = extract_pcm_data(data);
    }

    // Anything we encode must parse back with the same layout.
    if data.len() >= 4 {
        let format = AudioFormat::new(
            u16::from(data[0] % 8),
            u32::from(u16::from_le_bytes([data[1], data[2]])),
            u16::from(data[3] % 5),
        );
        if let Ok(wav) = encode_to_vec(&data[4..], &format) {
            let info = WavInfo::parse(&wav).expect("encoded WAV parses");
            assert_eq!(info.channels, format.channel_count);
            assert_eq!(info.sample_rate, format.sample_rate);
            assert_eq!(info.data_len as usize, data.len() - 4);
        }
    }
});
