//! Bill-of-materials aggregation.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use super::budgets_model::{Budget, BudgetLine, BudgetLineKind};
use crate::cables::Cable;
use crate::connectors::Connector;
use crate::constants::{
    MAX_PHASES, MIN_PHASES, MONEY_DECIMAL_PRECISION, QUANTITY_DECIMAL_PRECISION, UNIT_EACH,
    UNIT_METER,
};
use crate::errors::CalculatorError;
use crate::groups::{Group, GroupItemKind};
use crate::materials::Material;
use crate::points::Point;
use crate::pole_screws::{select_pole_screw, PoleScrew};
use crate::projects::Project;
use crate::tension::TensionLevel;
use crate::utility_poles::UtilityPole;

/// The company catalog a budget is priced against, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct BudgetCatalog {
    materials: HashMap<String, Material>,
    cables: HashMap<String, Cable>,
    connectors: HashMap<String, Connector>,
    pole_screws: Vec<PoleScrew>,
    utility_poles: HashMap<String, UtilityPole>,
    groups: HashMap<String, Group>,
}

impl BudgetCatalog {
    pub fn new(
        materials: Vec<Material>,
        cables: Vec<Cable>,
        connectors: Vec<Connector>,
        pole_screws: Vec<PoleScrew>,
        utility_poles: Vec<UtilityPole>,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            materials: materials.into_iter().map(|m| (m.id.clone(), m)).collect(),
            cables: cables.into_iter().map(|c| (c.id.clone(), c)).collect(),
            connectors: connectors.into_iter().map(|c| (c.id.clone(), c)).collect(),
            pole_screws,
            utility_poles: utility_poles.into_iter().map(|p| (p.id.clone(), p)).collect(),
            groups: groups.into_iter().map(|g| (g.id.clone(), g)).collect(),
        }
    }
}

/// Number of conductors strung per span at a tension level.
///
/// Low-tension runs carry a neutral conductor on top of the phases.
pub fn conductor_count(tension_level: TensionLevel, phases: i32) -> i32 {
    match tension_level {
        TensionLevel::Medium => phases,
        TensionLevel::Low => phases + 1,
    }
}

struct LineAccumulator {
    code: String,
    description: String,
    unit: String,
    unit_price: Decimal,
    quantity: Decimal,
}

#[derive(Default)]
struct BillOfMaterials {
    lines: HashMap<(BudgetLineKind, String), LineAccumulator>,
}

impl BillOfMaterials {
    #[allow(clippy::too_many_arguments)]
    fn add(
        &mut self,
        kind: BudgetLineKind,
        item_id: &str,
        code: &str,
        description: &str,
        unit: &str,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Result<(), CalculatorError> {
        let acc = self
            .lines
            .entry((kind, item_id.to_string()))
            .or_insert_with(|| LineAccumulator {
                code: code.to_string(),
                description: description.to_string(),
                unit: unit.to_string(),
                unit_price,
                quantity: Decimal::ZERO,
            });
        acc.quantity = acc
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| overflow(code))?;
        Ok(())
    }

    fn into_lines(self) -> Result<Vec<BudgetLine>, CalculatorError> {
        let mut lines = self
            .lines
            .into_iter()
            .filter(|(_, acc)| !acc.quantity.is_zero())
            .map(|((kind, item_id), acc)| {
                let quantity = acc.quantity.round_dp_with_strategy(
                    QUANTITY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                let total = quantity
                    .checked_mul(acc.unit_price)
                    .ok_or_else(|| overflow(&acc.code))?;
                Ok(BudgetLine {
                    kind,
                    item_id,
                    total: round_money(total),
                    code: acc.code,
                    description: acc.description,
                    unit: acc.unit,
                    quantity: quantity.normalize(),
                    unit_price: acc.unit_price,
                })
            })
            .collect::<Result<Vec<BudgetLine>, CalculatorError>>()?;
        lines.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        Ok(lines)
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(code: &str) -> CalculatorError {
    CalculatorError::Calculation(format!("amount overflow on '{}'", code))
}

fn missing(point: &Point, entity: &str, id: &str) -> CalculatorError {
    CalculatorError::MissingReference {
        point: point.name.clone(),
        entity: entity.to_string(),
        id: id.to_string(),
    }
}

fn check_phases(tension_level: TensionLevel, phases: i32) -> Result<(), CalculatorError> {
    if !(MIN_PHASES..=MAX_PHASES).contains(&phases) {
        return Err(CalculatorError::InvalidPhaseCount {
            tension: tension_level.to_string(),
            phases,
        });
    }
    Ok(())
}

/// Derives the bill of materials of `project` from its `points`.
///
/// Points are visited in sequence order. Every quantity is summed per
/// catalog entry; line totals are rounded to cents and the budget total is
/// the sum of the rounded line totals.
pub fn calculate_budget(
    project: &Project,
    points: &[Point],
    catalog: &BudgetCatalog,
    calculated_at: NaiveDateTime,
) -> Result<Budget, CalculatorError> {
    check_phases(TensionLevel::Medium, project.medium_tension_phases)?;
    check_phases(TensionLevel::Low, project.low_tension_phases)?;

    let mut ordered: Vec<&Point> = points.iter().collect();
    ordered.sort_by_key(|p| p.sequence);

    let mut bill = BillOfMaterials::default();

    for point in ordered {
        let pole = match point.utility_pole_id.as_deref() {
            Some(id) => {
                let pole = catalog
                    .utility_poles
                    .get(id)
                    .ok_or_else(|| missing(point, "utility pole", id))?;
                bill.add(
                    BudgetLineKind::UtilityPole,
                    &pole.id,
                    &pole.code,
                    &pole.description,
                    UNIT_EACH,
                    pole.unit_price,
                    Decimal::ONE,
                )?;
                Some(pole)
            }
            None => None,
        };

        for tension_level in [TensionLevel::Medium, TensionLevel::Low] {
            let phases = project.phases(tension_level);

            if let Some(group_id) = point.group_id(tension_level) {
                let group = catalog
                    .groups
                    .get(group_id)
                    .ok_or_else(|| missing(point, "group", group_id))?;
                if group.tension_level != tension_level {
                    return Err(CalculatorError::TensionMismatch {
                        point: point.name.clone(),
                        entity: "group".to_string(),
                        code: group.code.clone(),
                        expected: tension_level.to_string(),
                        actual: group.tension_level.to_string(),
                    });
                }

                for item in &group.items {
                    let quantity = item
                        .effective_quantity(phases)
                        .ok_or_else(|| overflow(&group.code))?;
                    match item.kind {
                        GroupItemKind::Material => {
                            let id = item.reference_id.as_deref().unwrap_or_default();
                            let material = catalog
                                .materials
                                .get(id)
                                .ok_or_else(|| missing(point, "material", id))?;
                            bill.add(
                                BudgetLineKind::Material,
                                &material.id,
                                &material.code,
                                &material.description,
                                &material.unit,
                                material.unit_price,
                                quantity,
                            )?;
                        }
                        GroupItemKind::Connector => {
                            let id = item.reference_id.as_deref().unwrap_or_default();
                            let connector = catalog
                                .connectors
                                .get(id)
                                .ok_or_else(|| missing(point, "connector", id))?;
                            bill.add(
                                BudgetLineKind::Connector,
                                &connector.id,
                                &connector.code,
                                &connector.description,
                                UNIT_EACH,
                                connector.unit_price,
                                quantity,
                            )?;
                        }
                        GroupItemKind::PoleScrew => {
                            let pole = pole.ok_or_else(|| CalculatorError::PoleScrewWithoutPole {
                                point: point.name.clone(),
                                group: group.code.clone(),
                            })?;
                            let screw =
                                select_pole_screw(&catalog.pole_screws, pole.min_screw_length_mm)
                                    .ok_or_else(|| CalculatorError::NoSuitablePoleScrew {
                                        pole: pole.code.clone(),
                                        min_length_mm: pole.min_screw_length_mm,
                                    })?;
                            bill.add(
                                BudgetLineKind::PoleScrew,
                                &screw.id,
                                &screw.code,
                                &screw.description,
                                UNIT_EACH,
                                screw.unit_price,
                                quantity,
                            )?;
                        }
                    }
                }
            }

            if let Some(cable_id) = point.cable_id(tension_level) {
                let cable = catalog
                    .cables
                    .get(cable_id)
                    .ok_or_else(|| missing(point, "cable", cable_id))?;
                if cable.tension_level != tension_level {
                    return Err(CalculatorError::TensionMismatch {
                        point: point.name.clone(),
                        entity: "cable".to_string(),
                        code: cable.code.clone(),
                        expected: tension_level.to_string(),
                        actual: cable.tension_level.to_string(),
                    });
                }
                let length = point
                    .span_length_m
                    .checked_mul(Decimal::from(conductor_count(tension_level, phases)))
                    .ok_or_else(|| overflow(&cable.code))?;
                if length > Decimal::ZERO {
                    bill.add(
                        BudgetLineKind::Cable,
                        &cable.id,
                        &cable.code,
                        &cable.description,
                        UNIT_METER,
                        cable.unit_price,
                        length,
                    )?;
                }
            }
        }
    }

    let lines = bill.into_lines()?;
    let total = lines.iter().try_fold(Decimal::ZERO, |sum, line| {
        sum.checked_add(line.total).ok_or_else(|| overflow(&line.code))
    })?;

    Ok(Budget {
        project_id: project.id.clone(),
        lines,
        total,
        point_count: points.len() as i32,
        calculated_at,
    })
}
