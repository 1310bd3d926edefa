mod gateway;

pub use gateway::GatewayService;
