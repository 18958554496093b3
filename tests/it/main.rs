mod column;
mod footer;
mod thrift;
