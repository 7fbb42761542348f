//! Program activity catalogs per facility type.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FacilityKind {
    #[default]
    HealthCenter,
    Hospital,
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FacilityKind::HealthCenter => "Health Center",
            FacilityKind::Hospital => "Hospital",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub activity: &'static str,
    pub activity_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCategory {
    pub code: &'static str,
    pub name: &'static str,
    pub activities: Vec<Activity>,
}

const fn act(activity: &'static str, activity_type: &'static str) -> Activity {
    Activity {
        activity,
        activity_type,
    }
}

const HC_RUNNING_COSTS: &str = "Provide running costs for DHs & HCs";
const SALARIES: &str = "Provide salaries for health facilities staff (DHs, HCs)";

pub fn activity_catalog(kind: FacilityKind) -> Vec<ActivityCategory> {
    match kind {
        FacilityKind::HealthCenter => health_center_catalog(),
        FacilityKind::Hospital => hospital_catalog(),
    }
}

fn health_center_catalog() -> Vec<ActivityCategory> {
    vec![
        ActivityCategory {
            code: "hr",
            name: "Human Resources (HR)",
            activities: vec![act(SALARIES, "Salary"), act(SALARIES, "Bonus 2023/2024")],
        },
        ActivityCategory {
            code: "trc",
            name: "Travel Related Costs (TRC)",
            activities: vec![
                act(
                    "Conduct support group meeting at Health Facilities especially for adolescents and children",
                    "Workshop",
                ),
                act("Conduct supervision from Health centers to CHWs", "Supervision"),
                act("Conduct home visit for lost to follow up", "Supervision"),
                act(
                    "Conduct sample transportation from Health centers to District Hospitals",
                    "Transport",
                ),
            ],
        },
        ActivityCategory {
            code: "hpe",
            name: "Health Products & Equipment (HPE)",
            activities: vec![act(
                "Support to DHs and HCs to improve and maintain infrastructure standards",
                "Maintenance and Repair",
            )],
        },
        ActivityCategory {
            code: "pa",
            name: "Program Administration Costs (PA)",
            activities: vec![
                act(HC_RUNNING_COSTS, "Running costs Communication"),
                act(HC_RUNNING_COSTS, "Running costs Office Supplies"),
                act(HC_RUNNING_COSTS, "Running cost Refreshments"),
                act(HC_RUNNING_COSTS, "Running cost Transport for reporting"),
                act(HC_RUNNING_COSTS, "Running costs Bank charges"),
            ],
        },
    ]
}

fn hospital_catalog() -> Vec<ActivityCategory> {
    vec![
        ActivityCategory {
            code: "hr",
            name: "Human Resources (HR)",
            activities: vec![
                act(SALARIES, "Salary"),
                act("Provide bonus for 2023-24", "Bonus"),
                act("Provide performance bonuses for hospital staff", "Bonus"),
            ],
        },
        ActivityCategory {
            code: "trc",
            name: "Travel Related Costs (TRC)",
            activities: vec![
                act(
                    "Conduct outreach to provide HIV testing service in communities",
                    "Campaign for HIV testing",
                ),
                act(
                    "Conduct outreach VMMC provision at decentralized level",
                    "Campaign",
                ),
                act(
                    "Conduct district events related to WAD celebration",
                    "Campaign",
                ),
                act(
                    "Conduct training of Peer educators for Negative partner of Sero-Discordant couples on HIV and AIDS and sexual health issues",
                    "Training",
                ),
                act(
                    "Conduct integrated clinical mentorship from District Hospital to Health centres to support Treat All and DSDM implementation",
                    "Supervision",
                ),
                act(
                    "Conduct annual coordination meeting at district level",
                    "Workshop",
                ),
                act(
                    "Conduct quarterly multidisciplinary team meeting (MDT). Participants are those not supported by other donor",
                    "Workshop",
                ),
                act(
                    "Conduct quarterly multidisciplinary team meeting (MDT)",
                    "Workshop",
                ),
                act(
                    "Conduct support group meeting at Health Facilities especially for adolescents and children and younger adults",
                    "Meeting",
                ),
                act("Conduct home visit for lost to follow up", "Supervision"),
                act(
                    "Conduct supervision and DQA from District Hospitals to Health Centers",
                    "Supervision",
                ),
                act(
                    "Conduct sample transportation from District Hospitals to Referal hospitals/NRL",
                    "Transport",
                ),
            ],
        },
        ActivityCategory {
            code: "hpe",
            name: "Health Products & Equipment (HPE)",
            activities: vec![act(
                "Support to DHs and HCs to improve and maintain infrastructure standards - Motor car Vehicles",
                "Maintenance",
            )],
        },
        ActivityCategory {
            code: "pa",
            name: "Program Administration Costs (PA)",
            activities: vec![
                act("National and sub-HIV databases", "Utilities"),
                act("Infrastructure and Equipment", "Communication"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_catalogs_share_category_codes() {
        let codes = |kind| {
            activity_catalog(kind)
                .into_iter()
                .map(|category| category.code)
                .collect::<Vec<_>>()
        };
        assert_eq!(codes(FacilityKind::HealthCenter), vec!["hr", "trc", "hpe", "pa"]);
        assert_eq!(codes(FacilityKind::HealthCenter), codes(FacilityKind::Hospital));
    }
}
