//! Role to capability mapping
//!
//! Two static tables drive authorization and the sidebar: what each role may
//! reach, and which links each role is shown (in display order). Adding a role
//! means adding rows, not branches.

use crate::contract::{Capability, NavEntry, Role};

use Capability::*;

const GRANTS: &[(Role, &[Capability])] = &[
    (
        Role::Admin,
        &[
            Dashboard,
            Franchises,
            Users,
            Inspections,
            Clients,
            Reports,
            Billing,
            Settings,
            SupervisorValidation,
            SubmitForValidation,
        ],
    ),
    (
        Role::Commercial,
        &[Dashboard, Franchises, Inspections, Clients, Reports, Billing],
    ),
    (
        Role::FranchiseManager,
        &[Dashboard, Users, Inspections, Clients, Reports, Billing],
    ),
    (
        Role::Supervisor,
        &[Dashboard, Inspections, SupervisorValidation, Reports],
    ),
    (
        Role::Inspector,
        &[Dashboard, Inspections, Reports, NewInspection, SubmitForValidation],
    ),
];

const NAVIGATION: &[(Role, &[(Capability, &str)])] = &[
    (
        Role::Admin,
        &[
            (Dashboard, "Dashboard"),
            (Franchises, "Franchises"),
            (Users, "Utilisateurs"),
            (Inspections, "Inspections"),
            (Clients, "Clients"),
            (Reports, "Rapports"),
            (Billing, "Facturation"),
            (Settings, "Paramètres"),
        ],
    ),
    (
        Role::Commercial,
        &[
            (Dashboard, "Dashboard"),
            (Franchises, "Franchises"),
            (Inspections, "Inspections"),
            (Clients, "Clients"),
            (Reports, "Rapports"),
            (Billing, "Facturation"),
        ],
    ),
    (
        Role::FranchiseManager,
        &[
            (Dashboard, "Dashboard"),
            (Users, "Équipe"),
            (Inspections, "Inspections"),
            (Clients, "Clients"),
            (Reports, "Rapports"),
            (Billing, "Facturation"),
        ],
    ),
    (
        Role::Supervisor,
        &[
            (Dashboard, "Dashboard"),
            (Inspections, "Inspections"),
            (SupervisorValidation, "Validation"),
            (Reports, "Rapports"),
        ],
    ),
    (
        Role::Inspector,
        &[
            (Dashboard, "Dashboard"),
            (Inspections, "Inspections"),
            (NewInspection, "Nouvelle Inspection"),
        ],
    ),
];

/// Capabilities granted to a role
pub fn granted(role: Role) -> &'static [Capability] {
    GRANTS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, caps)| *caps)
        .unwrap_or(&[])
}

pub fn can(role: Role, capability: Capability) -> bool {
    granted(role).contains(&capability)
}

/// Sidebar links for a role, in display order
pub fn navigation(role: Role) -> Vec<NavEntry> {
    NAVIGATION
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, links)| *links)
        .unwrap_or(&[])
        .iter()
        .filter_map(|(capability, label)| {
            capability.route().map(|path| NavEntry {
                capability: *capability,
                path,
                label: *label,
            })
        })
        .collect()
}
