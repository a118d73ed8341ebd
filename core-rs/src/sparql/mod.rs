/**
 * sparql module
 *
 * - query: SPARQL query builders
 * - results: SPARQL JSON result sets
 * - executor: the query-execution seam used by the concept service
 * - client: remote endpoint over HTTP
 * - local: in-memory dataset
 */

pub mod client;
pub mod executor;
pub mod local;
pub mod query;
pub mod results;

pub use client::HttpSparqlClient;
pub use executor::QueryExecutor;
pub use local::LocalDataset;
pub use query::{graph_iri, validate_iri, SparqlQuery};
pub use results::{Row, SparqlResults};
