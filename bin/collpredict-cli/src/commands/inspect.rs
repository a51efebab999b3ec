// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `coll-predict inspect` command: show nodes and rank bindings.
//!
//! Only the topology is built; cost tables are not loaded.

use predictor::PredictorConfig;

pub async fn execute(config: PredictorConfig) -> anyhow::Result<()> {
    super::banner("Topology Inspector");

    let topo = config.build_topology()?;

    // ── Summary ────────────────────────────────────────────────
    println!("  {}", topo.summary());
    println!();

    // ── Nodes ──────────────────────────────────────────────────
    println!("  {:<4} {:<16} {:>6}  {}", "Idx", "Node", "Ranks", "Rank list");
    println!("  {}", "-".repeat(62));
    for (i, node) in topo.nodes().iter().enumerate() {
        let ranks = topo.ranks_on(i);
        println!(
            "  {:<4} {:<16} {:>6}  {}",
            i,
            node.name().as_str(),
            ranks.len(),
            compact(&ranks),
        );
    }
    println!();

    // ── Bindings ───────────────────────────────────────────────
    println!("  {:<6} {:<16} {:>5} {:>5} {:>5}", "Rank", "Node", "Core", "Unit", "NUMA");
    println!("  {}", "-".repeat(42));
    for (rank, binding) in topo.iter_bindings() {
        let node = &topo.nodes()[binding.node];
        println!(
            "  {:<6} {:<16} {:>5} {:>5} {:>5}",
            rank,
            node.name().as_str(),
            binding.core,
            node.unit_of_core(binding.core),
            node.numa_of_core(binding.core),
        );
    }
    println!();
    Ok(())
}

/// Renders ascending ranks as runs, e.g. `0-3,8,10-11`.
fn compact(ranks: &[usize]) -> String {
    let mut parts = Vec::new();
    let mut i = 0;
    while i < ranks.len() {
        let start = ranks[i];
        let mut end = start;
        while i + 1 < ranks.len() && ranks[i + 1] == end + 1 {
            i += 1;
            end = ranks[i];
        }
        parts.push(if start == end {
            start.to_string()
        } else {
            format!("{start}-{end}")
        });
        i += 1;
    }
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_runs() {
        assert_eq!(compact(&[0, 1, 2, 3, 8, 10, 11]), "0-3,8,10-11");
        assert_eq!(compact(&[5]), "5");
        assert_eq!(compact(&[]), "");
    }
}
