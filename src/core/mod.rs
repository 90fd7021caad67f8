//! Core data types for accession classification.
//!
//! - [`AccessionCategory`]: coarse category inferred from the letter-prefix length
//! - [`Classification`]: the `(database, type, description)` result
//! - [`accession`]: structural helpers (letter prefix, RefSeq shape, SRA codes)
//!
//! ## Prefix Lengths
//!
//! | Letters | Category   | Example      |
//! |---------|------------|--------------|
//! | 1-2     | nucleotide | `AE014297`   |
//! | 3       | protein    | `AAA12345`   |
//! | 3       | SRA        | `ERR5413122` |
//! | 4 or 6  | WGS        | `BCDE01000001` |
//! | 5       | MGA        | `AAAAA0000001` |
//!
//! RefSeq accessions (`NC_000962`) replace the category with the molecule type
//! declared by the matching RefSeq rule.
//!
//! [`AccessionCategory`]: types::AccessionCategory
//! [`Classification`]: types::Classification

pub mod accession;
pub mod types;
