// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]

//! Sign a JSON array of unsigned instructions into a block request.
//!
//! Usage: `batchsign <key.pk8> <instructions.json>`
//! The key file is created (PKCS#8, mode 0600) when missing.

use amunchain_ledger::core::{
    security::InstructionSigner,
    types::{BlockRequest, UnsignedInstruction},
};
use anyhow::{Context, Result};
use std::path::Path;

fn load_or_create_signer(path: &Path) -> Result<InstructionSigner> {
    if path.exists() {
        let pkcs8 = std::fs::read(path).with_context(|| format!("read key {}", path.display()))?;
        return InstructionSigner::from_pkcs8(&pkcs8).context("load key");
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let (signer, pkcs8) = InstructionSigner::generate().context("generate key")?;
    std::fs::write(path, &pkcs8)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }

    eprintln!("created key {} ({})", path.display(), signer.public_key_hex());
    Ok(signer)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(key_path), Some(input)) = (args.next(), args.next()) else {
        eprintln!("usage: batchsign <key.pk8> <instructions.json>");
        std::process::exit(2);
    };

    let signer = load_or_create_signer(Path::new(&key_path))?;

    let raw = std::fs::read_to_string(&input).with_context(|| format!("read {input}"))?;
    let unsigned: Vec<UnsignedInstruction> =
        serde_json::from_str(&raw).with_context(|| format!("parse {input}"))?;

    let transactions = unsigned.into_iter().map(|u| signer.sign(u)).collect();
    let request = BlockRequest::new(signer.public_key_hex(), transactions);

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
