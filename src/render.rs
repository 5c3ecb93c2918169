// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Output of listed items.

use std::io::{self, Write};

use prettytable::{format, Cell, Row, Table};

use crate::{
    api::{Item, Property, Resource, ScopeField},
    error::{Error, Result},
    inventory::ListStream,
};

/// A sink for listed items. `flush` is called once after the last item, including when the
/// listing was cut short by an error.
pub trait ItemWriter {
    fn write(&mut self, item: &Item) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Drain `items` into `writer`, returning the number of items written.
///
/// The first stream error stops the listing. Rows already written are flushed before the error is
/// returned.
pub fn render(items: ListStream, writer: &mut dyn ItemWriter, step: &str) -> Result<usize> {
    let mut count = 0;
    for item in items {
        match item {
            Ok(item) => {
                writer.write(&item)?;
                count += 1;
            }
            Err(source) => {
                writer.flush()?;
                return Err(Error::Remote {
                    step: step.to_string(),
                    source,
                });
            }
        }
    }
    writer.flush()?;
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Scope(ScopeField),
    Name,
    Property(Property),
}

/// Columns for `resource`, each marked with whether it is always shown.
fn columns(resource: Resource) -> Vec<(Column, bool)> {
    match resource {
        Resource::Entity(kind) => {
            let spec = kind.spec();
            let mut columns: Vec<_> = spec
                .scope_fields()
                .into_iter()
                .map(|f| (Column::Scope(f), spec.parents.contains(&f)))
                .collect();
            columns.push((Column::Name, true));
            columns.extend(
                spec.properties
                    .iter()
                    .filter(|p| p.property != Property::Name)
                    .map(|p| (Column::Property(p.property), false)),
            );
            columns
        }
        Resource::Attr(parent) => {
            let mut columns: Vec<_> = match parent {
                Some(kind) => {
                    let required = kind.spec().attr_parents();
                    kind.spec()
                        .attr_scope_fields()
                        .into_iter()
                        .map(|f| (Column::Scope(f), required.contains(&f)))
                        .collect()
                }
                None => vec![],
            };
            columns.push((Column::Name, true));
            columns.push((Column::Property(Property::Value), true));
            columns.push((Column::Property(Property::Protected), false));
            columns
        }
    }
}

fn title(resource: Resource, column: Column) -> String {
    match column {
        Column::Scope(f) => f.flag().to_uppercase(),
        Column::Name => match resource {
            Resource::Entity(kind) => kind.name().to_uppercase(),
            Resource::Attr(_) => "ATTR".to_string(),
        },
        Column::Property(p) => p.flag().to_uppercase(),
    }
}

fn cell(item: &Item, column: Column) -> String {
    match column {
        Column::Scope(f) => item.scope.get(f).unwrap_or_default().to_string(),
        Column::Name => item.name.clone(),
        Column::Property(p) => item.property(p).map(|v| v.to_string()).unwrap_or_default(),
    }
}

/// Collects rows and prints them as one table on flush. Optional columns that are empty in every
/// row are left out.
pub struct TableWriter<W: Write> {
    out: W,
    resource: Resource,
    rows: Vec<Vec<String>>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W, resource: Resource) -> Self {
        TableWriter {
            out,
            resource,
            rows: Vec::new(),
        }
    }
}

impl<W: Write> ItemWriter for TableWriter<W> {
    fn write(&mut self, item: &Item) -> io::Result<()> {
        let row = columns(self.resource)
            .into_iter()
            .map(|(c, _)| cell(item, c))
            .collect();
        self.rows.push(row);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let columns = columns(self.resource);
        let shown: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(i, (_, always))| *always || self.rows.iter().any(|r| !r[*i].is_empty()))
            .map(|(i, _)| i)
            .collect();

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(
            shown
                .iter()
                .map(|i| Cell::new(&title(self.resource, columns[*i].0)))
                .collect(),
        ));
        for row in self.rows.drain(..) {
            table.add_row(Row::new(shown.iter().map(|i| Cell::new(&row[*i])).collect()));
        }

        table.print(&mut self.out)?;
        self.out.flush()
    }
}

/// Writes one JSON object per line as items arrive.
pub struct JsonWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        JsonWriter { out }
    }
}

impl<W: Write> ItemWriter for JsonWriter<W> {
    fn write(&mut self, item: &Item) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, item)?;
        writeln!(self.out)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
