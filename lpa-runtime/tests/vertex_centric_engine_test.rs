use lpa_api::function::{
    MessagingContext, MessagingFunction, VertexCentricAlgorithm, VertexUpdateContext,
    VertexUpdateFunction,
};
use lpa_api::graph::VertexCentricGraph;
use lpa_api::message::MessageIterator;
use lpa_common::error::LpaError;
use lpa_common::types::{Edge, Vertex};
use lpa_runtime::graph::mem_graph::InMemoryGraph;
use lpa_runtime::graph::partitioned_graph::PartitionedGraph;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Delivery = (u64, i32, Vec<(u64, i64)>);

/// Sends `(superstep, value)` to every neighbour.
struct TagWithSuperstep;

impl MessagingFunction<i32, i64, (), (u64, i64)> for TagWithSuperstep {
    fn send_messages(
        &mut self,
        _vertex_key: &i32,
        vertex_value: &i64,
        context: &mut dyn MessagingContext<i32, (), (u64, i64)>,
    ) {
        let superstep = context.superstep();
        context.send_message_to_all_neighbors((superstep, *vertex_value));
    }
}

/// Records what every vertex received and never changes a value.
struct RecordDeliveries {
    seen: Arc<Mutex<Vec<Delivery>>>,
}

impl VertexUpdateFunction<i32, i64, (u64, i64)> for RecordDeliveries {
    fn update_vertex(
        &mut self,
        vertex_key: &i32,
        _vertex_value: &i64,
        messages: MessageIterator<(u64, i64)>,
        context: &mut dyn VertexUpdateContext<i64>,
    ) {
        let mut received: Vec<(u64, i64)> = messages.collect();
        received.sort();
        self.seen
            .lock()
            .unwrap()
            .push((context.superstep(), *vertex_key, received));
    }
}

#[test]
fn test_messages_delivered_in_same_superstep() {
    let vertices = vec![Vertex::new(1, 100i64), Vertex::new(2, 200), Vertex::new(3, 300)];
    let edges = vec![
        Edge::new(1, 2, ()),
        Edge::new(3, 2, ()),
        Edge::new(1, 2, ()),
    ];
    let seen = Arc::new(Mutex::new(Vec::new()));

    let graph = InMemoryGraph::new(vertices, edges);
    let result = graph
        .run_vertex_centric_iteration::<(u64, i64), _, _>(
            RecordDeliveries { seen: seen.clone() },
            TagWithSuperstep,
            5,
        )
        .unwrap();

    assert_eq!(result.supersteps, 1);
    assert!(result.converged);

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (1, 1, vec![]),
            (1, 2, vec![(1, 100), (1, 100), (1, 300)]),
            (1, 3, vec![]),
        ]
    );
}

/// Adds one to every value each superstep, so it never converges.
struct Increment {
    pre: Arc<AtomicU64>,
    post: Arc<AtomicU64>,
}

impl VertexUpdateFunction<i32, i64, i64> for Increment {
    fn pre_superstep(&mut self, _superstep: u64) {
        self.pre.fetch_add(1, Ordering::SeqCst);
    }

    fn update_vertex(
        &mut self,
        _vertex_key: &i32,
        vertex_value: &i64,
        _messages: MessageIterator<i64>,
        context: &mut dyn VertexUpdateContext<i64>,
    ) {
        context.set_new_vertex_value(vertex_value + 1);
    }

    fn post_superstep(&mut self, _superstep: u64) {
        self.post.fetch_add(1, Ordering::SeqCst);
    }
}

struct Silent;

impl MessagingFunction<i32, i64, (), i64> for Silent {
    fn send_messages(
        &mut self,
        _vertex_key: &i32,
        _vertex_value: &i64,
        _context: &mut dyn MessagingContext<i32, (), i64>,
    ) {
    }
}

#[test]
fn test_iteration_budget_stops_run() {
    let pre = Arc::new(AtomicU64::new(0));
    let post = Arc::new(AtomicU64::new(0));
    let vertices = vec![Vertex::new(1, 0i64), Vertex::new(2, 10)];

    let graph = PartitionedGraph::new(vertices, Vec::<Edge<i32, ()>>::new(), 2);
    let result = graph
        .run_vertex_centric_iteration::<i64, _, _>(
            Increment {
                pre: pre.clone(),
                post: post.clone(),
            },
            Silent,
            5,
        )
        .unwrap();

    assert_eq!(result.supersteps, 5);
    assert!(!result.converged);
    assert_eq!(pre.load(Ordering::SeqCst), 5);
    assert_eq!(post.load(Ordering::SeqCst), 5);

    let values: Vec<i64> = result.graph.vertices().into_iter().map(|v| v.value).collect();
    assert_eq!(values, vec![5, 15]);
}

/// Sends a message to a vertex that does not exist.
struct SendToGhost;

impl MessagingFunction<i32, i64, (), i64> for SendToGhost {
    fn send_messages(
        &mut self,
        _vertex_key: &i32,
        vertex_value: &i64,
        context: &mut dyn MessagingContext<i32, (), i64>,
    ) {
        context.send_message_to(404, *vertex_value);
    }
}

struct Keep;

impl VertexUpdateFunction<i32, i64, i64> for Keep {
    fn update_vertex(
        &mut self,
        _vertex_key: &i32,
        _vertex_value: &i64,
        _messages: MessageIterator<i64>,
        _context: &mut dyn VertexUpdateContext<i64>,
    ) {
    }
}

#[test]
fn test_message_to_unknown_vertex_fails() {
    let vertices = vec![Vertex::new(1, 0i64)];
    let graph = InMemoryGraph::new(vertices.clone(), Vec::<Edge<i32, ()>>::new());
    let err = graph
        .run_vertex_centric_iteration::<i64, _, _>(Keep, SendToGhost, 3)
        .err()
        .unwrap();
    assert!(matches!(err, LpaError::MissingVertexValue(_)));

    let graph = PartitionedGraph::new(vertices, Vec::<Edge<i32, ()>>::new(), 3);
    let err = graph
        .run_vertex_centric_iteration::<i64, _, _>(Keep, SendToGhost, 3)
        .err()
        .unwrap();
    assert!(matches!(err, LpaError::MissingVertexValue(_)));
}

/// Propagates the maximum value along out-edges, counting created functions.
struct MaxValue {
    created: Arc<AtomicUsize>,
    iterations: u64,
}

struct AdoptMax;

impl VertexUpdateFunction<i32, i64, i64> for AdoptMax {
    fn update_vertex(
        &mut self,
        _vertex_key: &i32,
        vertex_value: &i64,
        messages: MessageIterator<i64>,
        context: &mut dyn VertexUpdateContext<i64>,
    ) {
        let max = messages.fold(*vertex_value, i64::max);
        context.set_new_vertex_value(max);
    }
}

struct SendOverEdges;

impl MessagingFunction<i32, i64, (), i64> for SendOverEdges {
    fn send_messages(
        &mut self,
        _vertex_key: &i32,
        vertex_value: &i64,
        context: &mut dyn MessagingContext<i32, (), i64>,
    ) {
        let targets: Vec<i32> = context.out_edges().map(|e| e.target_id).collect();
        for target in targets {
            context.send_message_to(target, *vertex_value);
        }
    }
}

impl VertexCentricAlgorithm<i32, i64, (), i64> for MaxValue {
    fn name(&self) -> &str {
        "max_value"
    }

    fn max_iterations(&self) -> u64 {
        self.iterations
    }

    fn create_update_function(&self) -> Box<dyn VertexUpdateFunction<i32, i64, i64>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Box::new(AdoptMax)
    }

    fn create_messaging_function(&self) -> Box<dyn MessagingFunction<i32, i64, (), i64>> {
        Box::new(SendOverEdges)
    }
}

#[test]
fn test_run_algorithm_creates_functions_per_partition() {
    let vertices: Vec<Vertex<i32, i64>> = (0..8).map(|id| Vertex::new(id, id as i64)).collect();
    let edges: Vec<Edge<i32, ()>> = (0..7).map(|id| Edge::new(id + 1, id, ())).collect();
    let created = Arc::new(AtomicUsize::new(0));
    let algo = MaxValue {
        created: created.clone(),
        iterations: 20,
    };

    let graph = PartitionedGraph::new(vertices.clone(), edges.clone(), 4);
    let result = graph.run_algorithm::<i64, _>(&algo).unwrap();

    assert_eq!(created.load(Ordering::SeqCst), 4);
    assert!(result.converged);
    // Value 7 travels one hop per superstep down the chain 7 -> 6 -> ... -> 0.
    assert_eq!(result.supersteps, 8);
    assert!(result.graph.vertices().iter().all(|v| v.value == 7));

    let local = InMemoryGraph::new(vertices, edges)
        .run_algorithm::<i64, _>(&algo)
        .unwrap();
    assert_eq!(local.supersteps, 8);
    assert_eq!(local.graph.vertices(), result.graph.vertices());
}
