use smol_str::SmolStr;

use crate::{
    error::{Clause, Error, Result},
    expr::{Conjunction, Expr, IntoExpr, IntoOrderList, Operator, Ordered},
    fragment::Fragment,
    ident::{ColumnSchema, Table, TableRef, TableSchema},
    statement::Statement,
};

/// Conversion into the table named by FROM.
///
/// A bare `&str` or `String` is taken as a table name, a [`Fragment`] must
/// parse to a single quoted segment.
pub trait IntoTable {
    fn into_table(self) -> Result<TableRef>;
}

impl IntoTable for TableRef {
    fn into_table(self) -> Result<TableRef> {
        Ok(self)
    }
}

impl IntoTable for &Table {
    fn into_table(self) -> Result<TableRef> {
        Ok(self.table())
    }
}

impl IntoTable for Table {
    fn into_table(self) -> Result<TableRef> {
        Ok(self.table())
    }
}

impl IntoTable for Fragment {
    fn into_table(self) -> Result<TableRef> {
        self.parse_table()
    }
}

impl IntoTable for &str {
    fn into_table(self) -> Result<TableRef> {
        Ok(TableRef::new(self))
    }
}

impl IntoTable for String {
    fn into_table(self) -> Result<TableRef> {
        Ok(TableRef::new(self))
    }
}

impl IntoTable for SmolStr {
    fn into_table(self) -> Result<TableRef> {
        Ok(TableRef::new(self))
    }
}

impl<T: TableSchema> IntoTable for T {
    fn into_table(self) -> Result<TableRef> {
        Ok(T::table_ref())
    }
}

/// Conversion into the SELECT list.
pub trait IntoSelectList {
    fn into_select_list(self) -> Result<Vec<Expr>>;
}

impl<T> IntoSelectList for T
where
    T: IntoExpr,
{
    fn into_select_list(self) -> Result<Vec<Expr>> {
        Ok(vec![self.into_expr()?])
    }
}

impl<T, const N: usize> IntoSelectList for [T; N]
where
    T: IntoExpr,
{
    fn into_select_list(self) -> Result<Vec<Expr>> {
        self.into_iter().map(IntoExpr::into_expr).collect()
    }
}

impl<T> IntoSelectList for Vec<T>
where
    T: IntoExpr,
{
    fn into_select_list(self) -> Result<Vec<Expr>> {
        self.into_iter().map(IntoExpr::into_expr).collect()
    }
}

macro_rules! impl_select_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> IntoSelectList for ($($name,)+)
        where
            $($name: IntoExpr,)+
        {
            #[allow(non_snake_case)]
            fn into_select_list(self) -> Result<Vec<Expr>> {
                let ($($name,)+) = self;
                Ok(vec![$($name.into_expr()?),+])
            }
        }
    };
}

impl_select_tuple!(A, B);
impl_select_tuple!(A, B, C);
impl_select_tuple!(A, B, C, D);
impl_select_tuple!(A, B, C, D, E);
impl_select_tuple!(A, B, C, D, E, F);

fn check_select_item(expr: &Expr) -> Result<()> {
    match expr {
        Expr::Column(_) | Expr::Literal(_) | Expr::Placeholder(_) => Ok(()),
        other => Err(Error::InvalidSelectItem(other.kind())),
    }
}

/// Accumulates clause declarations and produces a [`Statement`].
///
/// The first failing declaration is kept and returned by [`Builder::build`];
/// declarations after it are ignored.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    select: Option<Vec<Expr>>,
    maybe_table: Option<TableRef>,
    maybe_where: Option<Expr>,
    order_by: Option<Vec<Ordered>>,
    error: Option<Error>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder with FROM already declared.
    pub fn table<T>(table: T) -> Self
    where
        T: IntoTable,
    {
        let mut builder = Self::new();
        builder.from(table);
        builder
    }

    pub fn table_as<T: TableSchema>() -> Self {
        Self {
            maybe_table: Some(T::table_ref()),
            ..Default::default()
        }
    }

    /// Run `closure` against a fresh builder and build the result.
    pub fn compose<F>(closure: F) -> Result<Statement>
    where
        F: FnOnce(&mut Self),
    {
        let mut builder = Self::new();
        closure(&mut builder);
        builder.build()
    }

    fn fail(&mut self, error: Error) -> &mut Self {
        self.error = Some(error);
        self
    }

    // select stuff

    pub fn select<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoSelectList,
    {
        if self.error.is_some() {
            return self;
        }
        if self.select.is_some() {
            return self.fail(Error::ConflictingClause(Clause::Select));
        }
        self.select = Some(Vec::new());
        self.add_select(cols)
    }

    pub fn add_select<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoSelectList,
    {
        if self.error.is_some() {
            return self;
        }
        let items = match cols
            .into_select_list()
            .and_then(|items| items.iter().try_for_each(check_select_item).map(|_| items))
        {
            Ok(items) => items,
            Err(err) => return self.fail(err),
        };
        self.select.get_or_insert_default().extend(items);
        self
    }

    pub fn select_as<T: ColumnSchema>(&mut self) -> &mut Self {
        self.select(T::columns())
    }

    // from stuff

    pub fn from<T>(&mut self, table: T) -> &mut Self
    where
        T: IntoTable,
    {
        if self.error.is_some() {
            return self;
        }
        if self.maybe_table.is_some() {
            return self.fail(Error::ConflictingClause(Clause::From));
        }
        match table.into_table() {
            Ok(table) => self.maybe_table = Some(table),
            Err(err) => return self.fail(err),
        }
        self
    }

    // where stuff

    /// Declare the WHERE condition.
    pub fn where_<T>(&mut self, condition: T) -> &mut Self
    where
        T: IntoExpr,
    {
        self.where_expr(None, condition)
    }

    /// Join `condition` to the WHERE clause with AND, or declare it.
    pub fn and_where<T>(&mut self, condition: T) -> &mut Self
    where
        T: IntoExpr,
    {
        self.where_expr(Some(Conjunction::And), condition)
    }

    /// Join `condition` to the WHERE clause with OR, or declare it.
    pub fn or_where<T>(&mut self, condition: T) -> &mut Self
    where
        T: IntoExpr,
    {
        self.where_expr(Some(Conjunction::Or), condition)
    }

    #[inline]
    pub fn where_binary_expr<L, R>(
        &mut self,
        conjunction: Option<Conjunction>,
        lhs: L,
        operator: Operator,
        rhs: R,
    ) -> &mut Self
    where
        L: IntoExpr,
        R: IntoExpr,
    {
        if self.error.is_some() {
            return self;
        }
        let binary = lhs
            .into_expr()
            .and_then(|lhs| Ok(Expr::binary(lhs, operator, rhs.into_expr()?)));
        match binary {
            Ok(binary) => self.where_expr(conjunction, binary),
            Err(err) => self.fail(err),
        }
    }

    fn where_expr<T>(&mut self, conjunction: Option<Conjunction>, condition: T) -> &mut Self
    where
        T: IntoExpr,
    {
        if self.error.is_some() {
            return self;
        }
        let condition = match condition.into_expr() {
            Ok(condition) => condition,
            Err(err) => return self.fail(err),
        };
        let condition = match (self.maybe_where.take(), conjunction) {
            (None, _) => condition,
            (Some(_), None) => return self.fail(Error::ConflictingClause(Clause::Where)),
            (Some(existing), Some(conjunction)) => {
                Expr::binary(existing, conjunction.into(), condition)
            }
        };
        self.maybe_where = Some(condition);
        self
    }

    // order stuff

    pub fn order_by<T>(&mut self, orders: T) -> &mut Self
    where
        T: IntoOrderList,
    {
        if self.error.is_some() {
            return self;
        }
        if self.order_by.is_some() {
            return self.fail(Error::ConflictingClause(Clause::OrderBy));
        }
        match orders.into_order_list() {
            Ok(orders) => self.order_by = Some(orders),
            Err(err) => return self.fail(err),
        }
        self
    }

    // building the builder

    pub fn build(&self) -> Result<Statement> {
        let statement = self.try_build();
        match statement {
            Ok(ref statement) => tracing::debug!(
                select = statement.select.len(),
                has_where = statement.filter.is_some(),
                order_by = statement.order_by.len(),
                placeholders = statement.placeholders().len(),
                "statement built"
            ),
            Err(ref err) => tracing::debug!(error = %err, "statement build failed"),
        }
        statement
    }

    fn try_build(&self) -> Result<Statement> {
        if let Some(ref err) = self.error {
            return Err(err.clone());
        }
        let select = match self.select {
            Some(ref select) if !select.is_empty() => select.clone(),
            _ => return Err(Error::IncompleteStatement(Clause::Select)),
        };
        let from = self
            .maybe_table
            .clone()
            .ok_or(Error::IncompleteStatement(Clause::From))?;

        Ok(Statement {
            select,
            from,
            filter: self.maybe_where.clone(),
            order_by: self.order_by.clone().unwrap_or_default(),
        })
    }
}
