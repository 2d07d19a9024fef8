// Copyright (c) The Movekv Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub(crate) fn save_config<T, P>(c: &T, output_file: P) -> Result<()>
where
    T: Serialize + DeserializeOwned,
    P: AsRef<Path>,
{
    let mut file = File::create(output_file)?;
    file.write_all(to_toml(c)?.as_bytes())?;
    Ok(())
}

pub(crate) fn to_toml<T>(c: &T) -> Result<String>
where
    T: Serialize + DeserializeOwned,
{
    // fix toml table problem, see https://github.com/alexcrichton/toml-rs/issues/142
    let c = toml::value::Value::try_from(c)?;
    Ok(toml::to_string(&c)?)
}

pub(crate) fn load_config<T, P>(path: P) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    P: AsRef<Path>,
{
    let mut file = File::open(&path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    parse(&contents)
}

pub(crate) fn parse<T>(serialized: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    Ok(toml::from_str(serialized)?)
}
