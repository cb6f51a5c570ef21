use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

/// Token dictionaries shared by the encoder and decoder, kept in one JSON
/// source so the index arrays and the reverse-lookup maps cannot drift.
#[derive(Deserialize)]
struct TokenTables {
    single_byte: Vec<String>,
    double_byte: Vec<Vec<String>>,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tokens.json");

    let raw = std::fs::read_to_string("tokens.json").expect("failed to read tokens.json");
    let tables: TokenTables = serde_json::from_str(&raw).expect("failed to parse tokens.json");

    assert_eq!(
        tables.single_byte.len(),
        236,
        "single-byte table must fill all 236 slots (pad unused slots with empty strings)"
    );
    assert!(
        tables.single_byte[..3].iter().all(String::is_empty),
        "single-byte slots 0 and 2 are wire markers and slot 1 is reserved; all three must stay empty"
    );
    assert_eq!(tables.double_byte.len(), 4, "exactly four double-byte dictionaries");
    for dict in &tables.double_byte {
        assert!(dict.len() < 256, "double-byte dictionary index must fit one byte");
    }

    let out_path = Path::new(&env::var("OUT_DIR").expect("OUT_DIR not set")).join("token_tables.rs");
    let mut out = BufWriter::new(File::create(&out_path).expect("failed to create token_tables.rs"));

    write_forward_tables(&mut out, &tables);
    write_reverse_maps(&mut out, &tables);
}

fn write_forward_tables(out: &mut impl Write, tables: &TokenTables) {
    writeln!(out, "/// Index-to-string table for single-byte tokens.").unwrap();
    writeln!(out, "pub static SINGLE_BYTE_TOKENS: [&str; 236] = [").unwrap();
    for token in &tables.single_byte {
        writeln!(out, "    {token:?},").unwrap();
    }
    writeln!(out, "];").unwrap();

    writeln!(out).unwrap();
    writeln!(out, "/// Index-to-string tables for the four double-byte dictionaries.").unwrap();
    writeln!(out, "pub static DOUBLE_BYTE_TOKENS: [&[&str]; 4] = [").unwrap();
    for dict in &tables.double_byte {
        writeln!(out, "    &[").unwrap();
        for token in dict {
            writeln!(out, "        {token:?},").unwrap();
        }
        writeln!(out, "    ],").unwrap();
    }
    writeln!(out, "];").unwrap();
}

fn write_reverse_maps(out: &mut impl Write, tables: &TokenTables) {
    let mut single = phf_codegen::Map::<&str>::new();
    let mut single_values = Vec::new();
    for (index, token) in tables.single_byte.iter().enumerate() {
        if !token.is_empty() {
            single_values.push((token.as_str(), format!("{index}u8")));
        }
    }
    for (token, value) in &single_values {
        single.entry(*token, value.as_str());
    }

    let mut double = phf_codegen::Map::<&str>::new();
    let mut double_values = Vec::new();
    for (dict, tokens) in tables.double_byte.iter().enumerate() {
        for (index, token) in tokens.iter().enumerate() {
            double_values.push((token.as_str(), format!("({dict}u8, {index}u8)")));
        }
    }
    for (token, value) in &double_values {
        double.entry(*token, value.as_str());
    }

    writeln!(out).unwrap();
    writeln!(out, "/// String-to-index map over the non-empty single-byte tokens.").unwrap();
    writeln!(
        out,
        "pub static SINGLE_BYTE_INDEX: phf::Map<&'static str, u8> = {};",
        single.build()
    )
    .unwrap();

    writeln!(out).unwrap();
    writeln!(out, "/// String-to-(dictionary, index) map over the double-byte tokens.").unwrap();
    writeln!(
        out,
        "pub static DOUBLE_BYTE_INDEX: phf::Map<&'static str, (u8, u8)> = {};",
        double.build()
    )
    .unwrap();
}
