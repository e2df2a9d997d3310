#![warn(missing_docs)]
//! Core types for the flocx marketplace.
//!
//! The marketplace trades resources between tenants ("projects"). A project
//! that administers a resource lists it as an [`models::Offer`], other
//! projects ask for resources with a [`models::Bid`], and an operator matches
//! the two into a [`models::Contract`] that is linked to its offers through
//! [`models::OfferContractRelationship`] rows.
//!
//! This crate holds no storage code. Storage backends implement the traits in
//! [`ports`], and every operation receives the caller's [`models::Context`]
//! so that tenant scoping is decided in one place.

/// Domain models for the marketplace.
///
/// This module contains the persisted entities, their strongly-typed ids, the
/// typed create/update payloads and the caller context used for
/// authorization. Update payloads never carry identifier or owner fields, so
/// an id cannot be rewritten by an update.
pub mod models;

/// Interface traits for the marketplace.
///
/// These are the "ports" that a storage backend implements, together with the
/// [`ports::ResourceAuthority`] trait describing the external collaborator
/// that decides who administers a resource.
pub mod ports;

mod failure;
pub use failure::Failure;
