//! Dependency ordering of records across every input file.
//!
//! Depth-first post-order keyed by record name: each record is emitted after
//! everything it depends on. Independent records keep their first-seen order.
use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::ir::ParsedModel;

pub fn sort_models(models: Vec<ParsedModel>) -> Result<Vec<ParsedModel>> {
    let mut by_name: IndexMap<&str, usize> = IndexMap::with_capacity(models.len());
    for (i, model) in models.iter().enumerate() {
        if let Some(&first) = by_name.get(model.name.as_str()) {
            return Err(Error::DuplicateModel {
                name: model.name.clone(),
                first: models[first].source_path.clone(),
                second: model.source_path.clone(),
            });
        }
        by_name.insert(&model.name, i);
    }

    let mut sorter = Sorter {
        models: &models,
        by_name,
        visited: vec![false; models.len()],
        in_progress: IndexSet::new(),
        order: Vec::with_capacity(models.len()),
    };
    for i in 0..models.len() {
        sorter.visit(i)?;
    }
    let order = sorter.order;

    let mut slots: Vec<Option<ParsedModel>> = models.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

struct Sorter<'a> {
    models: &'a [ParsedModel],
    by_name: IndexMap<&'a str, usize>,
    visited: Vec<bool>,
    in_progress: IndexSet<usize>, // current DFS path, in entry order
    order: Vec<usize>,
}

impl Sorter<'_> {
    fn visit(&mut self, i: usize) -> Result<()> {
        if self.visited[i] {
            return Ok(());
        }
        if let Some(pos) = self.in_progress.get_index_of(&i) {
            let mut cycle: Vec<String> = self
                .in_progress
                .iter()
                .skip(pos)
                .map(|&j| self.models[j].name.clone())
                .collect();
            cycle.push(self.models[i].name.clone());
            return Err(Error::CyclicDependency { cycle });
        }

        self.in_progress.insert(i);
        let models = self.models;
        let model = &models[i];
        for dep in &model.depends_on {
            let Some(&j) = self.by_name.get(dep.as_str()) else {
                return Err(Error::MissingDependency {
                    name: dep.clone(),
                    required_by: model.name.clone(),
                });
            };
            self.visit(j)?;
        }
        self.in_progress.pop();

        self.visited[i] = true;
        self.order.push(i);
        Ok(())
    }
}
