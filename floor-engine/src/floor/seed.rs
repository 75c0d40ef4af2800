//! Built-in floor layout and menu catalog
//!
//! The seed layout is what a fresh install (or an unreadable snapshot)
//! starts from.

use shared::models::{MenuItem, Order, Table, TableShape, TableStatus};
use shared::money::Money;

struct SeedTable {
    id: i64,
    name: &'static str,
    x: f64,
    y: f64,
    width: f64,
    shape: TableShape,
    status: TableStatus,
    capacity: u32,
    orders: &'static [(i64, &'static str, i64, u32)],
    arrival_time: Option<&'static str>,
}

const SEED_TABLES: &[SeedTable] = &[
    SeedTable {
        id: 1,
        name: "",
        x: 100.0,
        y: 100.0,
        width: 110.0,
        shape: TableShape::Round,
        status: TableStatus::Available,
        capacity: 2,
        orders: &[],
        arrival_time: None,
    },
    SeedTable {
        id: 2,
        name: "Ventana VIP",
        x: 300.0,
        y: 100.0,
        width: 110.0,
        shape: TableShape::Round,
        status: TableStatus::Occupied,
        capacity: 2,
        orders: &[
            (1, "Café Americano", 35, 2),
            (2, "Croissant de Almendras", 55, 1),
        ],
        arrival_time: None,
    },
    SeedTable {
        id: 3,
        name: "",
        x: 500.0,
        y: 100.0,
        width: 110.0,
        shape: TableShape::Round,
        status: TableStatus::Available,
        capacity: 2,
        orders: &[],
        arrival_time: None,
    },
    SeedTable {
        id: 4,
        name: "Familia López",
        x: 100.0,
        y: 300.0,
        width: 160.0,
        shape: TableShape::Rectangle,
        status: TableStatus::Reserved,
        capacity: 4,
        orders: &[],
        arrival_time: Some("20:30"),
    },
    SeedTable {
        id: 5,
        name: "",
        x: 320.0,
        y: 300.0,
        width: 160.0,
        shape: TableShape::Rectangle,
        status: TableStatus::Occupied,
        capacity: 4,
        orders: &[
            (3, "Filete Mignon", 450, 1),
            (4, "Copa de Vino Tinto Reserva", 180, 2),
            (5, "Agua con Gas Premium", 60, 2),
        ],
        arrival_time: None,
    },
    SeedTable {
        id: 6,
        name: "Grupo Grande",
        x: 100.0,
        y: 500.0,
        width: 220.0,
        shape: TableShape::Rectangle,
        status: TableStatus::Available,
        capacity: 6,
        orders: &[],
        arrival_time: None,
    },
];

/// Seed tables share one height
const SEED_TABLE_HEIGHT: f64 = 110.0;

const DEFAULT_MENU: &[(&str, &str, i64)] = &[
    ("cafe-americano", "Café Americano", 35),
    ("cafe-latte", "Café Latte", 45),
    ("te-chai", "Té Chai", 40),
    ("croissant", "Croissant de Almendras", 55),
    ("filete-mignon", "Filete Mignon", 450),
    ("vino-tinto", "Copa de Vino Tinto Reserva", 180),
    ("agua-gas", "Agua con Gas Premium", 60),
    ("pizza-pepperoni", "Pizza Pepperoni", 220),
    ("ensalada-cesar", "Ensalada César con Pollo", 180),
    ("pasta-bolognesa", "Pasta Bolognesa", 200),
    ("tiramisu", "Tiramisú Clásico", 120),
];

/// The fixed initial layout: six tables, numbers equal to ids
pub fn seed_tables() -> Vec<Table> {
    SEED_TABLES
        .iter()
        .map(|s| Table {
            id: s.id,
            number: s.id,
            name: s.name.to_string(),
            x: s.x,
            y: s.y,
            width: s.width,
            height: SEED_TABLE_HEIGHT,
            shape: s.shape,
            status: s.status,
            capacity: s.capacity,
            orders: s
                .orders
                .iter()
                .map(|&(id, name, units, quantity)| Order {
                    id,
                    name: name.to_string(),
                    price: Money::from_units(units),
                    quantity,
                })
                .collect(),
            arrival_time: s.arrival_time.map(str::to_string),
        })
        .collect()
}

/// Menu catalog used when no `MENU_FILE` is configured
pub fn default_menu() -> Vec<MenuItem> {
    DEFAULT_MENU
        .iter()
        .map(|&(id, name, units)| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_units(units),
        })
        .collect()
}
