#![no_main]

use libfuzzer_sys::fuzz_target;
use statreport::config::AnalysisConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; an accepted config survives a TOML round trip
        if let Ok(config) = AnalysisConfig::from_toml_str(input) {
            let text = toml::to_string(&config).expect("accepted config must serialize");
            let reparsed =
                AnalysisConfig::from_toml_str(&text).expect("serialized config must parse");
            assert_eq!(reparsed, config);
        }
    }
});
