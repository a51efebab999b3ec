// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `coll-predict algorithms` command: list the algorithm registry.

use collective::{registry, OperationKind};

pub async fn execute(op: Option<OperationKind>) -> anyhow::Result<()> {
    super::banner("Algorithm Registry");

    let operations: Vec<OperationKind> = match op {
        Some(op) => vec![op],
        None => OperationKind::ALL.to_vec(),
    };

    println!("  {:<10} {:<38} {}", "Operation", "Algorithm", "Status");
    println!("  {}", "-".repeat(62));
    for op in operations {
        let entries = registry::list(Some(op));
        if entries.is_empty() {
            println!("  {:<10} {:<38} {}", op.as_str(), "-", "none registered");
            continue;
        }
        for info in entries {
            let status = if info.implemented {
                "modelled"
            } else {
                "not implemented"
            };
            println!(
                "  {:<10} {:<38} {}",
                info.operation.as_str(),
                info.algorithm.as_str(),
                status
            );
        }
    }
    println!();
    Ok(())
}
