//! Presets command
//!
//! Usage: vlab presets [--domain <ID>]

use vlab_core::DomainId;
use vlab_engine::presets::{all_presets, presets_for};

use super::SessionArgs;

/// Execute presets command
pub fn execute(session: &SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let domains: Vec<DomainId> = match session.domain {
        Some(domain) => vec![domain],
        None => DomainId::ALL.to_vec(),
    };

    if session.json {
        let listed: Vec<_> = all_presets()
            .iter()
            .filter(|p| domains.contains(&p.domain()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for domain in domains {
        println!("{} ({})", domain.label(), domain);
        for preset in presets_for(domain) {
            println!("  {:<24} {}", preset.title, preset.subtitle);
        }
    }
    Ok(())
}
