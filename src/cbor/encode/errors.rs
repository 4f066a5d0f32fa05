/**
 * @file errors.rs
 * @author Krisna Pranav
 * @brief Errors[Encode]
 * @version 0.1
 * @date 2023-05-06
 *
 * @copyright Copyright (c) 2023 Krisna Pranav, NanoBlocksDevelopers
 *
 */

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
