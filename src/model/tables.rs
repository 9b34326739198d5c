//! Normalized in-memory tables with primary key indices

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, info};

use super::{Entity, Order, OrderDetail, OrderId, Pizza, PizzaType, MAX_PRICE, MAX_QUANTITY};
use crate::error::{AnalyticsError, Result};

/// The four sales tables, validated and indexed by primary key
///
/// A `SalesData` is immutable once built. Every row has passed the
/// load-time checks: unique keys, quantities in `1..=MAX_QUANTITY` and
/// prices in `0..=MAX_PRICE`.
/// Foreign keys are resolved later by the join resolver.
#[derive(Debug, Clone, Default)]
pub struct SalesData {
    orders: Vec<Order>,
    order_details: Vec<OrderDetail>,
    pizzas: Vec<Pizza>,
    pizza_types: Vec<PizzaType>,
    order_index: HashMap<OrderId, usize>,
    pizza_index: HashMap<String, usize>,
    pizza_type_index: HashMap<String, usize>,
}

impl SalesData {
    pub fn builder() -> SalesDataBuilder {
        SalesDataBuilder::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_details(&self) -> &[OrderDetail] {
        &self.order_details
    }

    pub fn pizzas(&self) -> &[Pizza] {
        &self.pizzas
    }

    pub fn pizza_types(&self) -> &[PizzaType] {
        &self.pizza_types
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.order_index.get(&order_id).map(|&i| &self.orders[i])
    }

    pub fn pizza(&self, pizza_id: &str) -> Option<&Pizza> {
        self.pizza_index.get(pizza_id).map(|&i| &self.pizzas[i])
    }

    pub fn pizza_type(&self, pizza_type_id: &str) -> Option<&PizzaType> {
        self.pizza_type_index
            .get(pizza_type_id)
            .map(|&i| &self.pizza_types[i])
    }

    pub fn is_empty(&self) -> bool {
        self.order_details.is_empty()
    }
}

/// Collects the four record collections and validates them into a [`SalesData`]
#[derive(Debug, Default)]
pub struct SalesDataBuilder {
    orders: Vec<Order>,
    order_details: Vec<OrderDetail>,
    pizzas: Vec<Pizza>,
    pizza_types: Vec<PizzaType>,
}

impl SalesDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn order_details(mut self, details: impl IntoIterator<Item = OrderDetail>) -> Self {
        self.order_details.extend(details);
        self
    }

    pub fn pizzas(mut self, pizzas: impl IntoIterator<Item = Pizza>) -> Self {
        self.pizzas.extend(pizzas);
        self
    }

    pub fn pizza_types(mut self, pizza_types: impl IntoIterator<Item = PizzaType>) -> Self {
        self.pizza_types.extend(pizza_types);
        self
    }

    /// Validate the collected rows and build the indexed tables
    pub fn build(self) -> Result<SalesData> {
        for detail in &self.order_details {
            if !(1..=MAX_QUANTITY).contains(&detail.quantity) {
                return Err(AnalyticsError::InvalidQuantity {
                    order_details_id: detail.order_details_id,
                    quantity: detail.quantity,
                });
            }
        }

        for pizza in &self.pizzas {
            if pizza.price < Decimal::ZERO || pizza.price > MAX_PRICE {
                return Err(AnalyticsError::InvalidPrice {
                    pizza_id: pizza.pizza_id.clone(),
                    price: pizza.price,
                });
            }
        }

        let order_index = index_by(&self.orders, Entity::Order, |o| o.order_id)?;
        index_by(&self.order_details, Entity::OrderDetail, |d| d.order_details_id)?;
        let pizza_index = index_by(&self.pizzas, Entity::Pizza, |p| p.pizza_id.clone())?;
        let pizza_type_index =
            index_by(&self.pizza_types, Entity::PizzaType, |t| t.pizza_type_id.clone())?;

        info!(
            "Loaded {} orders, {} order details, {} pizzas, {} pizza types",
            self.orders.len(),
            self.order_details.len(),
            self.pizzas.len(),
            self.pizza_types.len()
        );

        Ok(SalesData {
            orders: self.orders,
            order_details: self.order_details,
            pizzas: self.pizzas,
            pizza_types: self.pizza_types,
            order_index,
            pizza_index,
            pizza_type_index,
        })
    }
}

fn index_by<T, K, F>(rows: &[T], entity: Entity, key: F) -> Result<HashMap<K, usize>>
where
    K: Eq + Hash + ToString,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        let k = key(row);
        if index.contains_key(&k) {
            return Err(AnalyticsError::duplicate_key(entity, k));
        }
        index.insert(k, position);
    }
    debug!("Indexed {} {} rows", index.len(), entity);
    Ok(index)
}
